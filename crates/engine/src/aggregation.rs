//! Aggregation engine - the pure read-side projection behind the passport.
//!
//! Walks every effect source attached to a character (catalog adjustments in
//! attachment order, then the character's own inline effects) and produces
//! display-ready stat and ability lists plus the resolved granted-skill set.
//! Never performs I/O and never persists anything; it is recomputed on every
//! passport render.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::debug;

use passport_domain::value_objects::signed;
use passport_domain::{
    has_optional_marker, strip_optional_markers, Adjustment, Character, CharacterClass, Effect,
    InlineEffect, Skill,
};

use crate::skills::granted_skill_ids;

/// One stat-bonus contribution, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDisplayItem {
    pub label: String,
    pub value: f64,
    pub formatted: String,
    pub optional: bool,
}

/// One ability/note line, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityDisplayItem {
    pub title: String,
    pub text: String,
    pub optional: bool,
}

/// Everything the passport render needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportView {
    /// Stat contributions in source order (catalog first, then inline).
    pub stat_items: Vec<StatDisplayItem>,
    /// Ability lines, deduplicated and sorted alphabetically by title.
    pub ability_items: Vec<AbilityDisplayItem>,
    pub granted_skill_ids: BTreeSet<String>,
    pub has_content: bool,
    pub race: Option<String>,
}

/// Resolve a character snapshot into its passport view.
///
/// `adjustments` are the character's attached catalog adjustments in
/// attachment order; `classes` are its class records; `skill_catalog` is the
/// skill list used to expand class-scope tier grants. All inputs are assumed
/// already loaded - this function is pure.
pub fn resolve_passport(
    character: &Character,
    adjustments: &[Adjustment],
    classes: &[CharacterClass],
    skill_catalog: &[Skill],
) -> PassportView {
    let mut stat_items: Vec<StatDisplayItem> = Vec::new();
    let mut ability_items: Vec<AbilityDisplayItem> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut catalog_effects: Vec<Effect> = Vec::new();

    for adjustment in adjustments {
        for effect in adjustment.effects() {
            match &effect {
                Effect::StatBonus {
                    stat,
                    value,
                    condition,
                    ..
                } => stat_items.push(stat_item(
                    stat,
                    *value,
                    condition.as_deref(),
                    effect.is_optional(),
                )),
                other => {
                    if let Some(item) =
                        ability_item(&adjustment.title, other, effect.is_optional())
                    {
                        push_deduped(&mut ability_items, &mut seen, item);
                    }
                }
            }
            catalog_effects.push(effect);
        }
    }

    for inline in character.inline_effects() {
        match &inline {
            InlineEffect::StatAdjustment {
                title,
                stat,
                value,
                condition,
                ..
            } => {
                let optional = has_optional_marker(stat) || has_optional_marker(title);
                stat_items.push(stat_item(stat, *value, condition.as_deref(), optional));
            }
            InlineEffect::SpecialAbility { title, note }
            | InlineEffect::Dingus { title, note } => {
                let optional = has_optional_marker(note) || has_optional_marker(title);
                let text_source = if note.trim().is_empty() { title } else { note };
                let item = AbilityDisplayItem {
                    title: strip_optional_markers(title),
                    text: strip_optional_markers(text_source),
                    optional,
                };
                if item.title.is_empty() && item.text.is_empty() {
                    continue;
                }
                push_deduped(&mut ability_items, &mut seen, item);
            }
        }
    }

    ability_items.sort_by(|a, b| {
        (a.title.to_lowercase(), a.text.to_lowercase())
            .cmp(&(b.title.to_lowercase(), b.text.to_lowercase()))
    });

    let granted_skill_ids = granted_skill_ids(classes, &catalog_effects, skill_catalog);
    let has_content = !stat_items.is_empty() || !ability_items.is_empty();

    PassportView {
        has_content,
        race: character.race().map(str::to_string),
        stat_items,
        ability_items,
        granted_skill_ids,
    }
}

/// Build the stat display item for one stat-bonus contribution.
///
/// Marker stripping happens here, on the rendered text only; the underlying
/// stored value keeps its markers.
fn stat_item(stat: &str, value: f64, condition: Option<&str>, optional: bool) -> StatDisplayItem {
    let stat = strip_optional_markers(stat);
    StatDisplayItem {
        label: stat_label(&stat, condition),
        value,
        formatted: stat_formatted(&stat, value, condition),
        optional,
    }
}

fn stat_label(stat: &str, condition: Option<&str>) -> String {
    if let Some(condition) = condition {
        format!("Att/Acc w/ {condition}")
    } else if stat.contains("HP") {
        "HP".to_string()
    } else if stat.contains("Energy") {
        "Energy Point".to_string()
    } else {
        stat.to_string()
    }
}

fn stat_formatted(stat: &str, value: f64, condition: Option<&str>) -> String {
    let value = signed(value);
    match condition {
        Some(condition) if is_att_acc(stat) => format!("{value} Att/Acc w/ {condition}"),
        Some(condition) => format!("{value} {stat} vs {condition}"),
        None => format!("{value} {stat}"),
    }
}

fn is_att_acc(stat: &str) -> bool {
    let stat = stat.to_lowercase();
    ["attack", "accuracy", "att", "acc"]
        .iter()
        .any(|key| stat.contains(key))
}

/// Render a non-stat catalog effect with its fixed template. Items that
/// resolve to the bare `"Effect"` placeholder are noise and yield `None`.
fn ability_item(
    source_title: &str,
    effect: &Effect,
    optional: bool,
) -> Option<AbilityDisplayItem> {
    let (title, text) = match effect {
        Effect::Note { title, note, .. } => {
            let title = title.as_deref().unwrap_or(source_title);
            let text_source = if note.trim().is_empty() { title } else { note };
            (
                strip_optional_markers(title),
                strip_optional_markers(text_source),
            )
        }
        Effect::SkillModifier {
            target_field,
            modifier,
        } => (
            strip_optional_markers(source_title),
            format!("Modify skill {}: {}", target_field, modifier.formatted()),
        ),
        Effect::GrantSkill {
            max_tier: Some(max_tier),
            ..
        } => (
            strip_optional_markers(source_title),
            format!("Grant skills up to Tier {max_tier}"),
        ),
        Effect::GrantSkill { .. } => (
            strip_optional_markers(source_title),
            "Grant skill access".to_string(),
        ),
        Effect::PickSkillByTier { max_tier } => (
            strip_optional_markers(source_title),
            format!("Pick any skill up to Tier {max_tier} from your class(es)"),
        ),
        Effect::Unknown { kind } => {
            let text = kind.clone().unwrap_or_else(|| "Effect".to_string());
            if text == "Effect" {
                debug!(source_title, "dropping contentless effect element");
                return None;
            }
            (strip_optional_markers(source_title), text)
        }
        // Stat bonuses become stat items, never ability lines.
        Effect::StatBonus { .. } => return None,
    };
    Some(AbilityDisplayItem {
        title,
        text,
        optional,
    })
}

/// Collapse duplicates on normalized `(title, text)`; first occurrence wins.
fn push_deduped(
    items: &mut Vec<AbilityDisplayItem>,
    seen: &mut HashSet<(String, String)>,
    item: AbilityDisplayItem,
) {
    let key = (item.title.to_lowercase(), item.text.to_lowercase());
    if seen.insert(key) {
        items.push(item);
    }
}
