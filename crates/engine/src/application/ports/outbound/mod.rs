//! Outbound ports - interfaces the application requires from storage.

mod catalog_port;
mod character_store_port;

pub use catalog_port::AdjustmentCatalogPort;
pub use character_store_port::CharacterStorePort;

#[cfg(test)]
pub use catalog_port::MockAdjustmentCatalogPort;
#[cfg(test)]
pub use character_store_port::MockCharacterStorePort;

/// Storage failures, shared by every outbound port.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("{0} not found")]
    NotFound(String),
}
