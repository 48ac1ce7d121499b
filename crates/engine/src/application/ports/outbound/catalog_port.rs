use async_trait::async_trait;

use passport_domain::{Adjustment, AdjustmentId};

use super::StoreError;

/// Storage for the shared adjustment catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdjustmentCatalogPort: Send + Sync {
    /// Non-archived RACE-source entries, in catalog order. This is the
    /// candidate list race matching runs against.
    async fn list_active_race_adjustments(&self) -> Result<Vec<Adjustment>, StoreError>;

    async fn get(&self, id: AdjustmentId) -> Result<Option<Adjustment>, StoreError>;

    /// Fetch a batch of catalog entries. Missing ids are simply absent from
    /// the result; callers needing a fixed order re-sort themselves.
    async fn get_many(&self, ids: &[AdjustmentId]) -> Result<Vec<Adjustment>, StoreError>;

    /// Insert or update a catalog entry.
    async fn save(&self, adjustment: &Adjustment) -> Result<(), StoreError>;

    /// Archive or unarchive an entry; archived entries stop matching but
    /// existing attachments keep resolving.
    async fn set_archived(&self, id: AdjustmentId, archived: bool) -> Result<(), StoreError>;
}
