//! Passport engine - the read-side rules core of the character manager.
//!
//! Turns a character's raw stored state (class selections, free-form
//! attributes, attached catalog adjustments, inline one-off effects) into the
//! display-ready stat and ability lists a player sees on their passport.
//! Aggregation is a pure projection recomputed on every read; the only write
//! path with a side effect is race reconciliation, delegated atomically to
//! the storage port.

pub mod aggregation;
pub mod application;
pub mod resolver;
pub mod skills;

pub use aggregation::{resolve_passport, AbilityDisplayItem, PassportView, StatDisplayItem};
pub use application::{
    AdjustmentCatalogPort, AdjustmentService, CharacterService, CharacterStorePort, ServiceError,
    StoreError,
};
pub use resolver::match_race_adjustment;
pub use skills::{
    granted_skill_ids, pick_options, skill_list_view, sort_skills_for_display, SkillListView,
    TierPickOption,
};
