//! Unified Error Handling
//!
//! One error type for every core operation. Entities that are absent
//! and entities that belong to another tenant both surface as
//! `NotFound`, so tenant isolation never leaks existence information.

use shared::models::UnknownVariant;
use thiserror::Error;

/// Core operation error
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("table is already occupied: {0}")]
    TableOccupied(String),

    #[error("target table is occupied: {0}")]
    TargetOccupied(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("permission denied: {0}")]
    Forbidden(String),
}

/// Coarse error class the calling layer translates to user-facing
/// responses (404/409/400/403 in an HTTP deployment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    Forbidden,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::TableOccupied(_)
            | ServiceError::TargetOccupied(_)
            | ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::InvalidInput(_) => ErrorKind::InvalidInput,
            ServiceError::Forbidden(_) => ErrorKind::Forbidden,
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        ServiceError::NotFound(entity.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::InvalidInput(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }
}

impl From<UnknownVariant> for ServiceError {
    fn from(e: UnknownVariant) -> Self {
        ServiceError::InvalidInput(e.to_string())
    }
}

/// Core-level Result type
pub type ServiceResult<T> = Result<T, ServiceError>;
