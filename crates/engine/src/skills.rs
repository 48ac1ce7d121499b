//! Skill-grant resolution and the skill list display contract.
//!
//! A character can gain access to skills three ways: their classes' granted
//! lists, `grant_skill` effects (specific ids, or a tier ceiling within a
//! named class), and `pick_skill_by_tier` entitlements the player spends
//! themselves. Granted ids are a set; duplicate grants collapse.

use std::collections::BTreeSet;

use passport_domain::{CharacterClass, ClassId, Effect, Skill};

/// The union of every skill id the character has been granted.
///
/// Class lists may be stored as a real array or a JSON-encoded string; both
/// parse to the same set, and malformed JSON contributes nothing. Effect
/// grants add their named ids, and class-scope tier ceilings expand against
/// the skill catalog.
pub fn granted_skill_ids(
    classes: &[CharacterClass],
    effects: &[Effect],
    skill_catalog: &[Skill],
) -> BTreeSet<String> {
    let mut granted: BTreeSet<String> = classes
        .iter()
        .flat_map(|class| class.granted_skill_ids())
        .collect();

    for effect in effects {
        if let Effect::GrantSkill {
            skill_ids,
            class_id,
            max_tier,
        } = effect
        {
            granted.extend(skill_ids.iter().cloned());
            if let (Some(class_id), Some(max_tier)) = (class_id, max_tier) {
                granted.extend(
                    skill_catalog
                        .iter()
                        .filter(|skill| {
                            skill.class_id.to_string() == *class_id && skill.tier <= *max_tier
                        })
                        .map(|skill| skill.id.clone()),
                );
            }
        }
    }
    granted
}

/// One pick entitlement, expanded against the character's own classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPickOption {
    pub max_tier: u32,
    /// Skills the player may choose from, `(tier asc, title asc)`.
    pub eligible_skill_ids: Vec<String>,
}

/// Expand `pick_skill_by_tier` effects into concrete pick lists: any skill
/// from the character's own classes with tier at or below the ceiling.
pub fn pick_options(
    effects: &[Effect],
    own_classes: &[ClassId],
    skill_catalog: &[Skill],
) -> Vec<TierPickOption> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::PickSkillByTier { max_tier } => {
                let mut eligible: Vec<&Skill> = skill_catalog
                    .iter()
                    .filter(|skill| {
                        own_classes.contains(&skill.class_id) && skill.tier <= *max_tier
                    })
                    .collect();
                eligible.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.title.cmp(&b.title)));
                Some(TierPickOption {
                    max_tier: *max_tier,
                    eligible_skill_ids: eligible.into_iter().map(|s| s.id.clone()).collect(),
                })
            }
            _ => None,
        })
        .collect()
}

/// Sort skills for the list view: granted skills first, then
/// `(tier asc, title asc)` within each partition.
pub fn sort_skills_for_display(mut skills: Vec<Skill>, granted_ids: &BTreeSet<String>) -> Vec<Skill> {
    skills.sort_by(|a, b| {
        let a_not_granted = !granted_ids.contains(&a.id);
        let b_not_granted = !granted_ids.contains(&b.id);
        a_not_granted
            .cmp(&b_not_granted)
            .then_with(|| a.tier.cmp(&b.tier))
            .then_with(|| a.title.cmp(&b.title))
    });
    skills
}

/// What the skill list view renders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillListView {
    pub skills: Vec<Skill>,
    pub granted_ids: BTreeSet<String>,
}

/// Resolve grants and apply the display sort in one step.
pub fn skill_list_view(
    skills: Vec<Skill>,
    classes: &[CharacterClass],
    effects: &[Effect],
) -> SkillListView {
    let granted_ids = granted_skill_ids(classes, effects, &skills);
    let skills = sort_skills_for_display(skills, &granted_ids);
    SkillListView { skills, granted_ids }
}
