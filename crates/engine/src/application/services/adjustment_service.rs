//! Catalog curation and the race reconciliation use case.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use passport_domain::{Adjustment, AdjustmentId, CharacterAdjustment, CharacterId, DomainError};

use crate::application::ports::outbound::{AdjustmentCatalogPort, CharacterStorePort};
use crate::application::services::ServiceError;
use crate::resolver::match_race_adjustment;

pub struct AdjustmentService {
    catalog: Arc<dyn AdjustmentCatalogPort>,
    store: Arc<dyn CharacterStorePort>,
}

impl AdjustmentService {
    pub fn new(catalog: Arc<dyn AdjustmentCatalogPort>, store: Arc<dyn CharacterStorePort>) -> Self {
        Self { catalog, store }
    }

    /// Create or update a catalog entry. The title doubles as the race-match
    /// key, so a blank one is rejected before it reaches storage.
    pub async fn save_catalog_entry(&self, adjustment: &Adjustment) -> Result<(), ServiceError> {
        if adjustment.title.trim().is_empty() {
            return Err(DomainError::validation("adjustment title must not be empty").into());
        }
        self.catalog.save(adjustment).await?;
        Ok(())
    }

    pub async fn set_archived(
        &self,
        id: AdjustmentId,
        archived: bool,
    ) -> Result<(), ServiceError> {
        self.catalog.set_archived(id, archived).await?;
        Ok(())
    }

    /// Reconcile a character's RACE-source attachments with their declared
    /// race. Runs after any attribute edit; a race with no catalog match (or
    /// no race at all) clears the race attachments.
    ///
    /// The detach-and-attach swap is a single storage call so the character
    /// is never observable half-migrated.
    pub async fn apply_race_change(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<AdjustmentId>, ServiceError> {
        let character = self
            .store
            .load(character_id)
            .await?
            .ok_or_else(ServiceError::character_not_found)?;

        let matched = match character.race() {
            Some(race) => {
                let catalog = self.catalog.list_active_race_adjustments().await?;
                match_race_adjustment(race, &catalog).map(|a| a.id)
            }
            None => None,
        };

        self.store
            .replace_race_attachments(character_id, matched, Utc::now())
            .await?;
        info!(
            character = %character_id,
            adjustment = ?matched,
            "reconciled race attachments"
        );
        Ok(matched)
    }

    /// Attach a catalog adjustment by hand. Attachments are unique per
    /// (character, adjustment) pair; duplicates are rejected before storage.
    pub async fn attach(
        &self,
        character_id: CharacterId,
        adjustment_id: AdjustmentId,
    ) -> Result<(), ServiceError> {
        self.catalog
            .get(adjustment_id)
            .await?
            .ok_or_else(ServiceError::adjustment_not_found)?;

        let mut character = self
            .store
            .load(character_id)
            .await?
            .ok_or_else(ServiceError::character_not_found)?;

        let attachment = CharacterAdjustment::new(character_id, adjustment_id, Utc::now());
        character.attach_adjustment(attachment.clone())?;
        self.store.attach_adjustment(&attachment).await?;
        Ok(())
    }

    /// Detach an adjustment; reports whether anything was removed.
    pub async fn detach(
        &self,
        character_id: CharacterId,
        adjustment_id: AdjustmentId,
    ) -> Result<bool, ServiceError> {
        let removed = self
            .store
            .detach_adjustment(character_id, adjustment_id)
            .await?;
        Ok(removed)
    }
}
