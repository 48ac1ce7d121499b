//! Character classes and the skills they expose.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ClassId;

/// A playable class. The interesting field for resolution is
/// `granted_skills`: skill ids the class hands out purely by membership,
/// stored either as a real JSON array or (on older rows) as a JSON-encoded
/// string of one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterClass {
    pub id: ClassId,
    pub title: String,
    pub granted_skills: Value,
}

impl CharacterClass {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ClassId::new(),
            title: title.into(),
            granted_skills: Value::Null,
        }
    }

    pub fn with_granted_skills(mut self, granted_skills: Value) -> Self {
        self.granted_skills = granted_skills;
        self
    }

    /// The class's granted skill ids, whatever shape they were stored in.
    /// Malformed JSON contributes nothing, never an error.
    pub fn granted_skill_ids(&self) -> Vec<String> {
        fn ids_from_array(items: &[Value]) -> Vec<String> {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }

        match &self.granted_skills {
            Value::Array(items) => ids_from_array(items),
            Value::String(encoded) => serde_json::from_str::<Value>(encoded)
                .ok()
                .and_then(|v| v.as_array().map(|items| ids_from_array(items)))
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// A skill as shown in the class skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Skill ids are content-authored strings, not UUIDs; they must compare
    /// equal to whatever the granted-skill lists contain.
    pub id: String,
    pub class_id: ClassId,
    pub title: String,
    pub tier: u32,
    pub description: Option<String>,
}

impl Skill {
    pub fn new(class_id: ClassId, id: impl Into<String>, title: impl Into<String>, tier: u32) -> Self {
        Self {
            id: id.into(),
            class_id,
            title: title.into(),
            tier,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
