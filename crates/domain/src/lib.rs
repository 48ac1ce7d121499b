pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Adjustment, AdjustmentSource, Character, CharacterAdjustment, CharacterClass,
    CharacterClassSlot, Skill,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{AdjustmentId, CharacterId, ClassId, UserId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    has_optional_marker, parse_effects, parse_inline_effects, serialize_inline_effects,
    strip_optional_markers, AlignmentData, Attributes, Effect, InlineEffect, ModifierValue,
    ALIGNMENT_MAX, ALIGNMENT_MAX_TICKS, ALIGNMENT_MIN,
};
