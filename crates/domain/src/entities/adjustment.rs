//! Adjustment catalog entries and their character attachments.
//!
//! An adjustment is a reusable bundle of effects (typically a racial trait)
//! that admins curate in a shared catalog and attach to characters. The
//! effect payload is schemaless JSON; see `value_objects::effect` for the
//! normalization boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{parse_effects, Effect};
use crate::{AdjustmentId, CharacterId};

/// Provenance of a catalog adjustment. Tags intent for admin filtering; it
/// never changes how effects resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSource {
    /// Attached automatically when the character's declared race matches.
    Race,
    /// Attached by hand for anything else.
    #[default]
    Custom,
}

impl AdjustmentSource {
    pub fn all() -> &'static [AdjustmentSource] {
        &[AdjustmentSource::Race, AdjustmentSource::Custom]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AdjustmentSource::Race => "Race",
            AdjustmentSource::Custom => "Custom",
        }
    }
}

/// A catalog-level, reusable bundle of effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub id: AdjustmentId,
    /// Display name; also the primary race-match key. Never empty.
    pub title: String,
    pub description: Option<String>,
    pub source: AdjustmentSource,
    /// `{"effects": [...]}` payload, kept raw; parse via [`Adjustment::effects`].
    pub effects_json: Value,
    /// Alternate match key: an array of strings, or an object carrying
    /// `race`, `raceId`, or `races` fields. Malformed tags simply never match.
    pub tags: Value,
    /// Archived entries are excluded from matching but not deleted.
    pub archived: bool,
}

impl Adjustment {
    pub fn new(title: impl Into<String>, source: AdjustmentSource) -> Self {
        Self {
            id: AdjustmentId::new(),
            title: title.into(),
            description: None,
            source,
            effects_json: Value::Null,
            tags: Value::Null,
            archived: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_effects(mut self, effects_json: Value) -> Self {
        self.effects_json = effects_json;
        self
    }

    pub fn with_tags(mut self, tags: Value) -> Self {
        self.tags = tags;
        self
    }

    /// Parse the stored effect payload into the canonical union.
    pub fn effects(&self) -> Vec<Effect> {
        parse_effects(&self.effects_json)
    }
}

/// Links one character to one catalog adjustment. Unique per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAdjustment {
    pub character_id: CharacterId,
    pub adjustment_id: AdjustmentId,
    /// Free-text admin notes about this particular attachment.
    pub notes: Option<String>,
    pub attached_at: DateTime<Utc>,
}

impl CharacterAdjustment {
    pub fn new(
        character_id: CharacterId,
        adjustment_id: AdjustmentId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            character_id,
            adjustment_id,
            notes: None,
            attached_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn effects_parse_from_stored_payload() {
        let adjustment = Adjustment::new("Elf", AdjustmentSource::Race).with_effects(json!({
            "effects": [{"type": "stat_bonus", "stat": "Agility", "value": 1}]
        }));
        assert_eq!(adjustment.effects().len(), 1);
    }

    #[test]
    fn null_effects_payload_parses_to_empty() {
        let adjustment = Adjustment::new("Golem", AdjustmentSource::Custom);
        assert!(adjustment.effects().is_empty());
    }
}
