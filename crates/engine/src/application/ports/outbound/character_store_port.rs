use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use passport_domain::{
    AdjustmentId, Character, CharacterAdjustment, CharacterClass, CharacterId, ClassId, Skill,
};

use super::StoreError;

/// Storage for characters and the class/skill records resolution reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStorePort: Send + Sync {
    /// Load a full character snapshot, attachments included.
    async fn load(&self, id: CharacterId) -> Result<Option<Character>, StoreError>;

    /// Replace the character's RACE-source attachments with `adjustment_id`
    /// (or with nothing). Implementations MUST detach and attach inside one
    /// transaction so a failure never leaves the character half-migrated.
    async fn replace_race_attachments(
        &self,
        character_id: CharacterId,
        adjustment_id: Option<AdjustmentId>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn attach_adjustment(&self, attachment: &CharacterAdjustment) -> Result<(), StoreError>;

    /// Detach; reports whether a row was actually removed.
    async fn detach_adjustment(
        &self,
        character_id: CharacterId,
        adjustment_id: AdjustmentId,
    ) -> Result<bool, StoreError>;

    /// Write the inline-effects column. `None` nulls it out.
    async fn save_inline_effects(
        &self,
        character_id: CharacterId,
        payload: Option<Value>,
    ) -> Result<(), StoreError>;

    /// Write the alignment column. Callers validate before calling; the
    /// store never sees an out-of-range triple.
    async fn save_alignment(
        &self,
        character_id: CharacterId,
        payload: Value,
    ) -> Result<(), StoreError>;

    async fn get_classes(&self, ids: &[ClassId]) -> Result<Vec<CharacterClass>, StoreError>;

    /// The skill catalog rows for the given classes, used for tier-grant
    /// expansion and the skill list view.
    async fn list_skills_for_classes(&self, ids: &[ClassId]) -> Result<Vec<Skill>, StoreError>;
}
