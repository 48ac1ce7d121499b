//! Application layer - use cases and orchestration.
//!
//! Ports are the outbound trait seams (storage, catalog); services are the
//! use-case implementations that wire the pure engine modules to them.

pub mod ports;
pub mod services;

pub use ports::outbound::{AdjustmentCatalogPort, CharacterStorePort, StoreError};
pub use services::{AdjustmentService, CharacterService, ServiceError};
