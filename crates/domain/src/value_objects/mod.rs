//! Value objects - Immutable objects defined by their attributes

mod alignment;
mod attributes;
mod coerce;
mod effect;
mod inline_effect;

pub use alignment::{AlignmentData, ALIGNMENT_MAX, ALIGNMENT_MAX_TICKS, ALIGNMENT_MIN};
pub use attributes::Attributes;
pub use effect::{
    has_optional_marker, parse_effects, signed, strip_optional_markers, Effect, ModifierValue,
    OPTIONAL_MARKER,
};
pub use inline_effect::{parse_inline_effects, serialize_inline_effects, InlineEffect};
