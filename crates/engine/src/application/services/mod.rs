//! Use-case services over the outbound ports.

mod adjustment_service;
mod character_service;

pub use adjustment_service::AdjustmentService;
pub use character_service::CharacterService;

use passport_domain::DomainError;

use super::ports::outbound::StoreError;

/// Failures surfaced by the services: either the domain rejected the input,
/// or storage failed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn character_not_found() -> Self {
        ServiceError::Store(StoreError::NotFound("character".to_string()))
    }

    pub(crate) fn adjustment_not_found() -> Self {
        ServiceError::Store(StoreError::NotFound("adjustment".to_string()))
    }
}
