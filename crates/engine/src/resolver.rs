//! Adjustment resolver - matches a declared race against the catalog.
//!
//! Matching is deliberately forgiving: titles and tags are compared
//! case-insensitively after trimming, and malformed `tags` JSON simply never
//! matches. When both a title match and a tag match exist, the title match
//! wins only because that is the lookup order; there is no documented
//! precedence beyond first-found (see the pinning test below).

use serde_json::Value;
use tracing::debug;

use passport_domain::{Adjustment, AdjustmentSource};

/// Normalize a race/trait string or tag for comparison.
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Find the adjustment to attach for a declared race, or `None`.
///
/// Only non-archived RACE-source catalog entries participate. Title equality
/// is checked first, then tags; within each pass the first catalog hit wins.
pub fn match_race_adjustment<'a>(race: &str, catalog: &'a [Adjustment]) -> Option<&'a Adjustment> {
    let needle = normalize(race);
    if needle.is_empty() {
        return None;
    }

    let candidates: Vec<&Adjustment> = catalog
        .iter()
        .filter(|a| !a.archived && a.source == AdjustmentSource::Race)
        .collect();

    if let Some(hit) = candidates
        .iter()
        .find(|a| normalize(&a.title) == needle)
    {
        return Some(hit);
    }

    let hit = candidates.iter().find(|a| tags_match(&a.tags, &needle));
    if hit.is_none() {
        debug!(race, "no catalog adjustment matched declared race");
    }
    hit.copied()
}

/// Check the alternate match key. `tags` may be an array of strings, or an
/// object carrying `race`, `raceId`, or `races` fields. Anything else is
/// treated as "no tag match", never an error.
fn tags_match(tags: &Value, needle: &str) -> bool {
    match tags {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|tag| normalize(tag) == needle),
        Value::Object(map) => {
            for key in ["race", "raceId"] {
                if let Some(tag) = map.get(key).and_then(Value::as_str) {
                    if normalize(tag) == needle {
                        return true;
                    }
                }
            }
            map.get("races")
                .and_then(Value::as_array)
                .map(|races| {
                    races
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|tag| normalize(tag) == needle)
                })
                .unwrap_or(false)
        }
        _ => false,
    }
}
