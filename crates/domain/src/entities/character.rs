//! Character aggregate root.
//!
//! A character is owned by a user, or unclaimed with a pending claim email.
//! Everything the passport view derives from lives here: free-form
//! attributes (including `race`), class slots, catalog adjustment
//! attachments, and the two schemaless JSON columns (inline effects,
//! alignment). The aggregation engine reads this snapshot; it never writes
//! back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{
    parse_inline_effects, serialize_inline_effects, AlignmentData, Attributes, InlineEffect,
};
use crate::{AdjustmentId, CharacterAdjustment, CharacterId, ClassId, DomainError, UserId};

/// A class held by a character, with the level reached in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterClassSlot {
    pub class_id: ClassId,
    pub level: u32,
}

/// A player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Owning user; `None` while the character awaits claiming.
    pub owner: Option<UserId>,
    /// Pending claim address for characters created ahead of registration.
    pub claim_email: Option<String>,
    pub attributes: Attributes,
    pub primary_class: Option<CharacterClassSlot>,
    pub secondary_class: Option<CharacterClassSlot>,
    /// Catalog attachments, unique per adjustment.
    pub adjustments: Vec<CharacterAdjustment>,
    /// Raw stored inline-effects payload; `None` and an empty payload are
    /// equivalent.
    pub inline_effects_json: Option<Value>,
    /// Raw stored alignment triple.
    pub alignment_json: Option<Value>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            owner: None,
            claim_email: None,
            attributes: Attributes::empty(),
            primary_class: None,
            secondary_class: None,
            adjustments: Vec::new(),
            inline_effects_json: None,
            alignment_json: None,
        }
    }

    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_claim_email(mut self, email: impl Into<String>) -> Self {
        self.claim_email = Some(email.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_primary_class(mut self, class_id: ClassId, level: u32) -> Self {
        self.primary_class = Some(CharacterClassSlot { class_id, level });
        self
    }

    pub fn with_secondary_class(mut self, class_id: ClassId, level: u32) -> Self {
        self.secondary_class = Some(CharacterClassSlot { class_id, level });
        self
    }

    /// The declared race, trimmed; drives adjustment matching.
    pub fn race(&self) -> Option<&str> {
        self.attributes.race()
    }

    /// Class ids in slot order (primary first).
    pub fn class_ids(&self) -> Vec<ClassId> {
        self.primary_class
            .iter()
            .chain(self.secondary_class.iter())
            .map(|slot| slot.class_id)
            .collect()
    }

    /// Parse the stored inline-effects payload.
    pub fn inline_effects(&self) -> Vec<InlineEffect> {
        self.inline_effects_json
            .as_ref()
            .map(parse_inline_effects)
            .unwrap_or_default()
    }

    /// Replace the inline effects, writing back the canonical payload. An
    /// empty list nulls the column rather than storing an empty wrapper.
    pub fn set_inline_effects(&mut self, effects: &[InlineEffect]) {
        self.inline_effects_json = serialize_inline_effects(effects);
    }

    /// Parse the stored alignment triple; malformed data reads as "no data".
    pub fn alignment(&self) -> Option<AlignmentData> {
        self.alignment_json.as_ref().and_then(AlignmentData::parse)
    }

    pub fn set_alignment(&mut self, alignment: AlignmentData) {
        self.alignment_json = Some(alignment.to_json());
    }

    /// Attach a catalog adjustment.
    ///
    /// # Errors
    ///
    /// Returns a constraint violation if the adjustment is already attached;
    /// attachments are unique per (character, adjustment) pair.
    pub fn attach_adjustment(&mut self, attachment: CharacterAdjustment) -> Result<(), DomainError> {
        if self
            .adjustments
            .iter()
            .any(|a| a.adjustment_id == attachment.adjustment_id)
        {
            return Err(DomainError::constraint(format!(
                "adjustment {} already attached",
                attachment.adjustment_id
            )));
        }
        self.adjustments.push(attachment);
        Ok(())
    }

    /// Detach an adjustment; returns whether anything was removed.
    pub fn detach_adjustment(&mut self, adjustment_id: AdjustmentId) -> bool {
        let before = self.adjustments.len();
        self.adjustments.retain(|a| a.adjustment_id != adjustment_id);
        self.adjustments.len() < before
    }

    /// Attached adjustment ids in attachment order.
    pub fn adjustment_ids(&self) -> Vec<AdjustmentId> {
        self.adjustments.iter().map(|a| a.adjustment_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn attach_is_unique_per_pair() {
        let mut character = Character::new("Maeve");
        let adjustment_id = AdjustmentId::new();
        let attachment = CharacterAdjustment::new(character.id, adjustment_id, Utc::now());

        character
            .attach_adjustment(attachment.clone())
            .expect("first attach succeeds");
        let err = character
            .attach_adjustment(attachment)
            .expect_err("duplicate attach rejected");
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(character.adjustments.len(), 1);
    }

    #[test]
    fn detach_reports_whether_anything_was_removed() {
        let mut character = Character::new("Maeve");
        let adjustment_id = AdjustmentId::new();
        character
            .attach_adjustment(CharacterAdjustment::new(
                character.id,
                adjustment_id,
                Utc::now(),
            ))
            .expect("attach succeeds");

        assert!(character.detach_adjustment(adjustment_id));
        assert!(!character.detach_adjustment(adjustment_id));
    }

    #[test]
    fn empty_inline_effects_null_out_the_stored_payload() {
        let mut character = Character::new("Maeve");
        character.inline_effects_json = Some(json!({"effects": [{"title": "Lucky Pebble"}]}));
        assert_eq!(character.inline_effects().len(), 1);

        character.set_inline_effects(&[]);
        assert_eq!(character.inline_effects_json, None);
        assert!(character.inline_effects().is_empty());
    }

    #[test]
    fn malformed_alignment_reads_as_no_data() {
        let mut character = Character::new("Maeve");
        character.alignment_json = Some(json!([9, 9, 9]));
        assert_eq!(character.alignment(), None);

        character.alignment_json = Some(json!([3, 1, 0]));
        assert_eq!(
            character.alignment(),
            Some(AlignmentData::new(3, 1, 0).expect("valid"))
        );
    }

    #[test]
    fn class_ids_keep_slot_order() {
        let primary = ClassId::new();
        let secondary = ClassId::new();
        let character = Character::new("Maeve")
            .with_primary_class(primary, 3)
            .with_secondary_class(secondary, 1);
        assert_eq!(character.class_ids(), vec![primary, secondary]);
    }
}
