//! Inline effects - character-private ad hoc modifiers.
//!
//! Unlike catalog adjustments these are never shared: an admin types them
//! straight onto one character, and they persist under the character row as
//! `{"effects": [...]}` JSON. Older rows use the retired `stat_bonus` type
//! name or omit `type` entirely; both are normalized here on read, so the
//! aggregation engine only ever sees the current union.

use serde_json::{json, Value};

use super::coerce;

/// A character-private modifier, edited ad hoc by an admin.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineEffect {
    /// A numeric bonus or penalty to a named stat.
    StatAdjustment {
        title: String,
        stat: String,
        value: f64,
        condition: Option<String>,
        apply_to_total: bool,
    },
    /// A named ability with explanatory text.
    SpecialAbility { title: String, note: String },
    /// Anything else worth a line on the passport.
    Dingus { title: String, note: String },
}

impl InlineEffect {
    /// The display title (may be empty on legacy rows).
    pub fn title(&self) -> &str {
        match self {
            InlineEffect::StatAdjustment { title, .. }
            | InlineEffect::SpecialAbility { title, .. }
            | InlineEffect::Dingus { title, .. } => title,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let title = coerce::string_field(value, "title");
        let note = coerce::string_field(value, "note");

        match value.get("type").and_then(Value::as_str).map(str::trim) {
            // `stat_bonus` is the pre-migration name for the same shape.
            Some("stat_adjustment") | Some("stat_bonus") => Some(InlineEffect::StatAdjustment {
                title: title.unwrap_or_default(),
                stat: coerce::string_field(value, "stat")
                    .or_else(|| coerce::string_field(value, "target"))
                    .unwrap_or_else(|| "Tough".to_string()),
                value: value
                    .get("value")
                    .and_then(coerce::as_number)
                    .unwrap_or(0.0),
                condition: coerce::string_field(value, "condition"),
                apply_to_total: value
                    .get("applyToTotal")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            }),
            Some("special_ability") => Some(InlineEffect::SpecialAbility {
                title: title.unwrap_or_default(),
                note: note.unwrap_or_default(),
            }),
            Some("dingus") => Some(InlineEffect::Dingus {
                title: title.unwrap_or_default(),
                note: note.unwrap_or_default(),
            }),
            // Untyped legacy rows: a bare title/note still renders as a
            // dingus; an element with neither is dropped entirely.
            _ => {
                if title.is_none() && note.is_none() {
                    None
                } else {
                    Some(InlineEffect::Dingus {
                        title: title.unwrap_or_default(),
                        note: note.unwrap_or_default(),
                    })
                }
            }
        }
    }

    fn to_value(&self) -> Value {
        match self {
            InlineEffect::StatAdjustment {
                title,
                stat,
                value,
                condition,
                apply_to_total,
            } => {
                let mut obj = json!({
                    "type": "stat_adjustment",
                    "title": title,
                    "stat": stat,
                    "value": value,
                    "applyToTotal": apply_to_total,
                });
                if let Some(condition) = condition {
                    obj["condition"] = json!(condition);
                }
                obj
            }
            InlineEffect::SpecialAbility { title, note } => json!({
                "type": "special_ability",
                "title": title,
                "note": note,
            }),
            InlineEffect::Dingus { title, note } => json!({
                "type": "dingus",
                "title": title,
                "note": note,
            }),
        }
    }
}

/// Parse a character's stored inline-effects payload. Non-object input
/// (a bare array included) and a missing `effects` key both mean "no inline
/// effects".
pub fn parse_inline_effects(payload: &Value) -> Vec<InlineEffect> {
    payload
        .get("effects")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(InlineEffect::from_value).collect())
        .unwrap_or_default()
}

/// Serialize inline effects for write-back. An empty list serializes to
/// `None`: callers rely on that to null out the stored column instead of
/// persisting an empty wrapper.
pub fn serialize_inline_effects(effects: &[InlineEffect]) -> Option<Value> {
    if effects.is_empty() {
        return None;
    }
    Some(json!({
        "effects": effects.iter().map(InlineEffect::to_value).collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_well_formed_effects() {
        let effects = vec![
            InlineEffect::StatAdjustment {
                title: "Blessing of Stone".to_string(),
                stat: "Tough".to_string(),
                value: 2.0,
                condition: Some("while underground".to_string()),
                apply_to_total: true,
            },
            InlineEffect::SpecialAbility {
                title: "Stone Sense".to_string(),
                note: "Detect tunnels within 30 feet".to_string(),
            },
            InlineEffect::Dingus {
                title: "Lucky Pebble".to_string(),
                note: String::new(),
            },
        ];
        let payload = serialize_inline_effects(&effects).expect("non-empty payload");
        assert_eq!(parse_inline_effects(&payload), effects);
    }

    #[test]
    fn empty_and_null_serialize_identically() {
        assert_eq!(serialize_inline_effects(&[]), None);
        assert!(parse_inline_effects(&json!(null)).is_empty());
        assert!(parse_inline_effects(&json!({"effects": []})).is_empty());
    }

    #[test]
    fn legacy_stat_bonus_normalizes_to_stat_adjustment() {
        let effects = parse_inline_effects(&json!({
            "effects": [{"type": "stat_bonus", "target": "Agility", "value": "2"}]
        }));
        assert_eq!(
            effects,
            vec![InlineEffect::StatAdjustment {
                title: String::new(),
                stat: "Agility".to_string(),
                value: 2.0,
                condition: None,
                apply_to_total: false,
            }]
        );
    }

    #[test]
    fn stat_field_takes_precedence_over_target() {
        let effects = parse_inline_effects(&json!({
            "effects": [{"type": "stat_bonus", "stat": "Energy", "target": "Agility", "value": 1}]
        }));
        assert!(
            matches!(&effects[0], InlineEffect::StatAdjustment { stat, .. } if stat == "Energy")
        );
    }

    #[test]
    fn missing_stat_and_target_defaults_to_tough() {
        let effects = parse_inline_effects(&json!({
            "effects": [{"type": "stat_bonus", "value": "lots"}]
        }));
        assert_eq!(
            effects,
            vec![InlineEffect::StatAdjustment {
                title: String::new(),
                stat: "Tough".to_string(),
                value: 0.0,
                condition: None,
                apply_to_total: false,
            }]
        );
    }

    #[test]
    fn untyped_element_falls_back_to_dingus() {
        let effects = parse_inline_effects(&json!({
            "effects": [{"title": "Iron Ration"}, {"note": "Smells faintly of ozone"}]
        }));
        assert_eq!(
            effects,
            vec![
                InlineEffect::Dingus {
                    title: "Iron Ration".to_string(),
                    note: String::new(),
                },
                InlineEffect::Dingus {
                    title: String::new(),
                    note: "Smells faintly of ozone".to_string(),
                },
            ]
        );
    }

    #[test]
    fn untyped_element_with_nothing_to_show_is_dropped() {
        let effects = parse_inline_effects(&json!({
            "effects": [{"color": "red"}, "not an object", 7]
        }));
        assert!(effects.is_empty());
    }

    #[test]
    fn non_object_payload_parses_to_empty() {
        assert!(parse_inline_effects(&json!("effects")).is_empty());
        assert!(parse_inline_effects(&json!(12)).is_empty());
    }

    #[test]
    fn bare_array_without_wrapper_reads_as_no_effects() {
        assert!(parse_inline_effects(&json!([{"title": "Lucky Pebble"}])).is_empty());
    }
}
