//! Character-side use cases: the passport and skill list reads, and the two
//! schemaless column writes (inline effects, alignment).

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use passport_domain::{
    parse_inline_effects, serialize_inline_effects, Adjustment, AlignmentData, Character,
    CharacterId, Effect,
};

use crate::aggregation::{resolve_passport, PassportView};
use crate::application::ports::outbound::{AdjustmentCatalogPort, CharacterStorePort};
use crate::application::services::ServiceError;
use crate::skills::{self, SkillListView};

pub struct CharacterService {
    store: Arc<dyn CharacterStorePort>,
    catalog: Arc<dyn AdjustmentCatalogPort>,
}

impl CharacterService {
    pub fn new(store: Arc<dyn CharacterStorePort>, catalog: Arc<dyn AdjustmentCatalogPort>) -> Self {
        Self { store, catalog }
    }

    /// Replace a character's inline effects from a raw editor payload.
    ///
    /// The payload is normalized through the domain union before write-back,
    /// so legacy spellings are migrated on save and an emptied list nulls the
    /// stored column.
    pub async fn replace_inline_effects(
        &self,
        character_id: CharacterId,
        payload: &Value,
    ) -> Result<(), ServiceError> {
        self.load(character_id).await?;
        let effects = parse_inline_effects(payload);
        self.store
            .save_inline_effects(character_id, serialize_inline_effects(&effects))
            .await?;
        Ok(())
    }

    /// Replace a character's alignment triple. Validation happens before the
    /// write; an out-of-range triple never reaches storage.
    pub async fn replace_alignment(
        &self,
        character_id: CharacterId,
        alignment: i64,
        up_ticks: i64,
        down_ticks: i64,
    ) -> Result<(), ServiceError> {
        let data = AlignmentData::new(alignment, up_ticks, down_ticks)?;
        self.load(character_id).await?;
        self.store
            .save_alignment(character_id, data.to_json())
            .await?;
        Ok(())
    }

    /// Resolve the passport view for one character.
    pub async fn passport_view(
        &self,
        character_id: CharacterId,
    ) -> Result<PassportView, ServiceError> {
        let character = self.load(character_id).await?;
        let adjustments = self.attached_adjustments(&character).await?;
        let class_ids = character.class_ids();
        let classes = self.store.get_classes(&class_ids).await?;
        let skill_catalog = self.store.list_skills_for_classes(&class_ids).await?;
        Ok(resolve_passport(
            &character,
            &adjustments,
            &classes,
            &skill_catalog,
        ))
    }

    /// Resolve the skill list view (granted-first ordering) for one character.
    pub async fn skill_list_view(
        &self,
        character_id: CharacterId,
    ) -> Result<SkillListView, ServiceError> {
        let character = self.load(character_id).await?;
        let effects: Vec<Effect> = self
            .attached_adjustments(&character)
            .await?
            .iter()
            .flat_map(Adjustment::effects)
            .collect();
        let class_ids = character.class_ids();
        let classes = self.store.get_classes(&class_ids).await?;
        let skill_catalog = self.store.list_skills_for_classes(&class_ids).await?;
        Ok(skills::skill_list_view(skill_catalog, &classes, &effects))
    }

    async fn load(&self, character_id: CharacterId) -> Result<Character, ServiceError> {
        self.store
            .load(character_id)
            .await?
            .ok_or_else(ServiceError::character_not_found)
    }

    /// Fetch the character's catalog adjustments, restored to attachment
    /// order regardless of how the batch fetch returns them.
    async fn attached_adjustments(
        &self,
        character: &Character,
    ) -> Result<Vec<Adjustment>, ServiceError> {
        let ids = character.adjustment_ids();
        let mut by_id: HashMap<_, _> = self
            .catalog
            .get_many(&ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{
        MockAdjustmentCatalogPort, MockCharacterStorePort,
    };
    use chrono::Utc;
    use mockall::predicate::*;
    use passport_domain::{AdjustmentSource, CharacterAdjustment};
    use serde_json::json;

    fn service_with(store: MockCharacterStorePort) -> CharacterService {
        CharacterService::new(Arc::new(store), Arc::new(MockAdjustmentCatalogPort::new()))
    }

    fn service_with_catalog(
        store: MockCharacterStorePort,
        catalog: MockAdjustmentCatalogPort,
    ) -> CharacterService {
        CharacterService::new(Arc::new(store), Arc::new(catalog))
    }

    fn loading(store: &mut MockCharacterStorePort, character: Character) {
        store
            .expect_load()
            .with(eq(character.id))
            .returning(move |_| Ok(Some(character.clone())));
    }

    #[tokio::test]
    async fn emptied_inline_effects_null_the_stored_column() {
        let character = Character::new("Maeve");
        let character_id = character.id;

        let mut store = MockCharacterStorePort::new();
        loading(&mut store, character);
        store
            .expect_save_inline_effects()
            .withf(move |id, payload| *id == character_id && payload.is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        service_with(store)
            .replace_inline_effects(character_id, &json!({"effects": []}))
            .await
            .expect("ok");
    }

    #[tokio::test]
    async fn legacy_inline_spellings_are_migrated_on_save() {
        let character = Character::new("Maeve");
        let character_id = character.id;

        let mut store = MockCharacterStorePort::new();
        loading(&mut store, character);
        store
            .expect_save_inline_effects()
            .withf(|_, payload| {
                let saved = payload.as_ref().expect("non-empty payload");
                saved["effects"][0]["type"] == json!("stat_adjustment")
                    && saved["effects"][0]["stat"] == json!("Agility")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        service_with(store)
            .replace_inline_effects(
                character_id,
                &json!({"effects": [{"type": "stat_bonus", "target": "Agility", "value": 2}]}),
            )
            .await
            .expect("ok");
    }

    #[tokio::test]
    async fn invalid_alignment_never_reaches_storage() {
        // No save_alignment expectation: a write would fail the test. The
        // triple is rejected before the character is even loaded.
        let store = MockCharacterStorePort::new();

        let err = service_with(store)
            .replace_alignment(CharacterId::new(), 0, 2, 2)
            .await
            .expect_err("out-of-range alignment rejected");
        assert!(matches!(err, ServiceError::Domain(_)));
    }

    #[tokio::test]
    async fn valid_alignment_is_written_as_the_canonical_triple() {
        let character = Character::new("Maeve");
        let character_id = character.id;

        let mut store = MockCharacterStorePort::new();
        loading(&mut store, character);
        store
            .expect_save_alignment()
            .withf(move |id, payload| *id == character_id && *payload == json!([3, 1, 0]))
            .times(1)
            .returning(|_, _| Ok(()));

        service_with(store)
            .replace_alignment(character_id, 3, 1, 0)
            .await
            .expect("ok");
    }

    #[tokio::test]
    async fn missing_character_reads_as_not_found() {
        let mut store = MockCharacterStorePort::new();
        store.expect_load().returning(|_| Ok(None));

        let err = service_with(store)
            .passport_view(CharacterId::new())
            .await
            .expect_err("missing character");
        assert!(matches!(err, ServiceError::Store(_)));
    }

    #[tokio::test]
    async fn passport_view_restores_attachment_order() {
        let first = Adjustment::new("First Trait", AdjustmentSource::Race).with_effects(
            json!({"effects": [{"type": "stat_bonus", "stat": "Zeal", "value": 1}]}),
        );
        let second = Adjustment::new("Second Trait", AdjustmentSource::Custom).with_effects(
            json!({"effects": [{"type": "stat_bonus", "stat": "Agility", "value": 2}]}),
        );

        let mut character = Character::new("Maeve");
        let character_id = character.id;
        for adjustment in [&first, &second] {
            character
                .attach_adjustment(CharacterAdjustment::new(
                    character_id,
                    adjustment.id,
                    Utc::now(),
                ))
                .expect("attach");
        }

        let mut store = MockCharacterStorePort::new();
        loading(&mut store, character);
        store.expect_get_classes().returning(|_| Ok(vec![]));
        store
            .expect_list_skills_for_classes()
            .returning(|_| Ok(vec![]));

        // The batch fetch comes back in the wrong order on purpose.
        let mut catalog = MockAdjustmentCatalogPort::new();
        let fetched = vec![second.clone(), first.clone()];
        catalog
            .expect_get_many()
            .returning(move |_| Ok(fetched.clone()));

        let view = service_with_catalog(store, catalog)
            .passport_view(character_id)
            .await
            .expect("ok");
        let labels: Vec<&str> = view.stat_items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeal", "Agility"]);
    }

    #[tokio::test]
    async fn skill_list_view_resolves_grants_through_attachments() {
        let granting = Adjustment::new("Gifted", AdjustmentSource::Custom).with_effects(
            json!({"effects": [{"type": "grant_skill", "skillId": "s2"}]}),
        );

        let mut character = Character::new("Maeve");
        let character_id = character.id;
        character
            .attach_adjustment(CharacterAdjustment::new(
                character_id,
                granting.id,
                Utc::now(),
            ))
            .expect("attach");

        let mut store = MockCharacterStorePort::new();
        loading(&mut store, character);
        store.expect_get_classes().returning(|_| Ok(vec![]));

        let mut catalog = MockAdjustmentCatalogPort::new();
        catalog
            .expect_get_many()
            .returning(move |_| Ok(vec![granting.clone()]));
        store.expect_list_skills_for_classes().returning(|_| {
            let class_id = passport_domain::ClassId::new();
            Ok(vec![
                passport_domain::Skill::new(class_id, "s1", "Plain", 1),
                passport_domain::Skill::new(class_id, "s2", "Granted", 3),
            ])
        });

        let view = service_with_catalog(store, catalog)
            .skill_list_view(character_id)
            .await
            .expect("ok");
        let ids: Vec<&str> = view.skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);
        assert!(view.granted_ids.contains("s2"));
    }
}
