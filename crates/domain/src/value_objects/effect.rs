//! Effect - the atomic modifier unit carried by catalog adjustments.
//!
//! Effects are persisted as schemaless JSON under an adjustment's
//! `effectsJson` column, so this module is the single normalization boundary:
//! every forward-compatibility shim (alternate field names, missing `type`,
//! values stored as strings) lives in `Effect::from_value`, and the rest of
//! the engine only ever sees the closed union defined here.

use serde::Serialize;
use serde_json::Value;

use super::coerce;

/// Legacy convention: effect text wrapped in `^^...^^` means the modifier is
/// optional (non-automatic). The marker is display noise, never data.
pub const OPTIONAL_MARKER: &str = "^^";

/// A single modifier attached to a character through an adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Adds `value` to `stat`, display-gated by `condition` text.
    StatBonus {
        stat: String,
        value: f64,
        condition: Option<String>,
        optional: bool,
    },
    /// Modifies a named field on a skill.
    SkillModifier {
        #[serde(rename = "targetField")]
        target_field: String,
        modifier: ModifierValue,
    },
    /// Grants access to specific skills, or a tier ceiling from another class.
    GrantSkill {
        #[serde(rename = "skillIds")]
        skill_ids: Vec<String>,
        #[serde(rename = "classId")]
        class_id: Option<String>,
        #[serde(rename = "maxTier")]
        max_tier: Option<u32>,
    },
    /// Lets the player pick any skill up to that tier from their own classes.
    PickSkillByTier {
        #[serde(rename = "maxTier")]
        max_tier: u32,
    },
    /// Free-form text rendered as-is (restrictions, reminders, one-line
    /// abilities). Also the landing spot for `dingus`/`special_ability`
    /// shaped elements that occasionally end up in catalog payloads.
    Note {
        title: Option<String>,
        note: String,
        optional: bool,
    },
    /// Anything this schema revision does not recognize. Kept so that a
    /// malformed element never aborts the parse of its siblings.
    Unknown { kind: Option<String> },
}

impl Effect {
    /// Normalize one stored JSON element into the closed union.
    ///
    /// Never fails: unclassifiable input degrades to [`Effect::Unknown`].
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Effect::Unknown { kind: None };
        }

        let kind = value.get("type").and_then(Value::as_str).map(str::trim);
        match kind {
            // `stat_adjustment` is the inline-effect spelling of the same shape.
            Some("stat_bonus") | Some("stat_adjustment") => Effect::StatBonus {
                stat: coerce::string_field(value, "stat").unwrap_or_default(),
                value: value
                    .get("value")
                    .and_then(coerce::as_number)
                    .unwrap_or(0.0),
                condition: coerce::string_field(value, "condition"),
                optional: value
                    .get("optional")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            Some("skill_modifier") => Effect::SkillModifier {
                target_field: coerce::string_field(value, "targetField").unwrap_or_default(),
                modifier: value
                    .get("modifier")
                    .map(ModifierValue::from_value)
                    .unwrap_or(ModifierValue::Number(0.0)),
            },
            Some("grant_skill") => {
                let mut skill_ids: Vec<String> = Vec::new();
                if let Some(id) = coerce::string_field(value, "skillId") {
                    skill_ids.push(id);
                }
                if let Some(ids) = value.get("skillIds").and_then(Value::as_array) {
                    skill_ids.extend(
                        ids.iter()
                            .filter_map(Value::as_str)
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty()),
                    );
                }
                Effect::GrantSkill {
                    skill_ids,
                    class_id: coerce::string_field(value, "classId"),
                    max_tier: value
                        .get("maxTier")
                        .and_then(coerce::as_integer)
                        .and_then(|t| u32::try_from(t).ok()),
                }
            }
            Some("pick_skill_by_tier") => {
                match value
                    .get("maxTier")
                    .and_then(coerce::as_integer)
                    .and_then(|t| u32::try_from(t).ok())
                {
                    Some(max_tier) => Effect::PickSkillByTier { max_tier },
                    // A pick with no ceiling is unusable; keep it visible as
                    // its raw type rather than inventing a tier.
                    None => Effect::Unknown {
                        kind: Some("pick_skill_by_tier".to_string()),
                    },
                }
            }
            _ => {
                let title = coerce::string_field(value, "title");
                let note = coerce::string_field(value, "note");
                if title.is_some() || note.is_some() {
                    Effect::Note {
                        title,
                        note: note.unwrap_or_default(),
                        optional: value
                            .get("optional")
                            .and_then(Value::as_bool)
                            .unwrap_or(false),
                    }
                } else {
                    Effect::Unknown {
                        kind: kind.filter(|k| !k.is_empty()).map(str::to_string),
                    }
                }
            }
        }
    }

    /// Whether this modifier is optional: the explicit flag, or the legacy
    /// `^^...^^` marker on the stat or note text.
    pub fn is_optional(&self) -> bool {
        match self {
            Effect::StatBonus { stat, optional, .. } => *optional || has_optional_marker(stat),
            Effect::Note {
                title,
                note,
                optional,
            } => {
                *optional
                    || has_optional_marker(note)
                    || title.as_deref().is_some_and(has_optional_marker)
            }
            _ => false,
        }
    }
}

/// A skill-field modifier, stored either as a number or a free-form string
/// (e.g. `"1/scene"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModifierValue {
    Number(f64),
    Text(String),
}

impl ModifierValue {
    fn from_value(value: &Value) -> Self {
        match coerce::as_number(value) {
            Some(n) => ModifierValue::Number(n),
            None => ModifierValue::Text(
                value.as_str().map(str::trim).unwrap_or_default().to_string(),
            ),
        }
    }

    /// Display form: numbers are signed (`+2` / `-1`), strings pass through.
    pub fn formatted(&self) -> String {
        match self {
            ModifierValue::Number(n) => signed(*n),
            ModifierValue::Text(s) => s.clone(),
        }
    }
}

/// Format a value with an explicit sign, dropping a redundant `.0`.
pub fn signed(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:+}", value as i64)
    } else {
        format!("{:+}", value)
    }
}

/// Parse an adjustment's `effectsJson` payload (`{"effects": [...]}`) into
/// the canonical union. Anything without the wrapper object, a bare array
/// included, is malformed and degrades to an empty list.
pub fn parse_effects(payload: &Value) -> Vec<Effect> {
    payload
        .get("effects")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Effect::from_value).collect())
        .unwrap_or_default()
}

/// True when the trimmed text is wrapped in the legacy `^^...^^` marker.
pub fn has_optional_marker(text: &str) -> bool {
    let t = text.trim();
    t.len() >= 2 * OPTIONAL_MARKER.len()
        && t.starts_with(OPTIONAL_MARKER)
        && t.ends_with(OPTIONAL_MARKER)
}

/// Strip the wrapping `^^...^^` marker for display. The underlying stored
/// value keeps its markers; only rendered text is cleaned.
pub fn strip_optional_markers(text: &str) -> String {
    let t = text.trim();
    if has_optional_marker(t) {
        t[OPTIONAL_MARKER.len()..t.len() - OPTIONAL_MARKER.len()]
            .trim()
            .to_string()
    } else {
        t.to_string()
    }
}
