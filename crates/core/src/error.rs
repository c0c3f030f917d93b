//! Storage error model.

use thiserror::Error;

/// Result type returned by every collaborator store.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a storage collaborator.
///
/// The authorization engine never translates these; they reach the caller as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store cannot be reached right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing store failed while serving a read.
    #[error("store failure: {0}")]
    Backend(String),

    /// An identifier was invalid (e.g. blank).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A row from another tenant was about to cross the boundary.
    #[error("tenant isolation violated: {0}")]
    TenantIsolation(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn tenant_isolation(msg: impl Into<String>) -> Self {
        Self::TenantIsolation(msg.into())
    }
}
