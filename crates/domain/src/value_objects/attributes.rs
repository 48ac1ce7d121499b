//! Free-form character attributes.
//!
//! Attributes are admin-authored JSON with no fixed schema; the only key the
//! engine interprets is `race`, which drives adjustment matching.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A character's free-form attribute blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Value);

impl Attributes {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty attribute object.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// The declared race, trimmed; `None` when absent or blank.
    pub fn race(&self) -> Option<&str> {
        let race = self.0.get("race")?.as_str()?.trim();
        if race.is_empty() {
            None
        } else {
            Some(race)
        }
    }

    /// Raw access for attributes the engine does not interpret.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn race_is_trimmed() {
        let attrs = Attributes::new(json!({"race": "  Elf "}));
        assert_eq!(attrs.race(), Some("Elf"));
    }

    #[test]
    fn blank_or_missing_race_is_none() {
        assert_eq!(Attributes::new(json!({"race": "   "})).race(), None);
        assert_eq!(Attributes::new(json!({"age": 40})).race(), None);
        assert_eq!(Attributes::new(json!(null)).race(), None);
    }

    #[test]
    fn uninterpreted_keys_stay_reachable() {
        let attrs = Attributes::new(json!({"race": "Elf", "homeland": "The Reach"}));
        assert_eq!(attrs.get("homeland"), Some(&json!("The Reach")));
    }
}
