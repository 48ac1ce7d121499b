//! Domain entities - Core business objects with identity

mod adjustment;
mod character;
mod character_class;

pub use adjustment::{Adjustment, AdjustmentSource, CharacterAdjustment};
pub use character::{Character, CharacterClassSlot};
pub use character_class::{CharacterClass, Skill};
