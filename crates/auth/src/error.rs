use thiserror::Error;

use warden_core::StoreError;

/// Errors raised by the authorization engine.
///
/// Resolution queries never use this to signal "no rights"; an account without
/// access resolves to an empty result. Only directory validation, credential
/// lookup and explicit authorization checks produce the typed variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// Tenant, application or lease does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Tenant, application or lease exists but is deactivated.
    #[error("disabled: {0}")]
    Disabled(String),

    #[error("bad credentials for application '{0}'")]
    BadCredentials(String),

    /// The directory has not been populated yet (cold start).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthorityError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn disabled(msg: impl Into<String>) -> Self {
        Self::Disabled(msg.into())
    }

    /// Whether the caller can correct the request (4xx class).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// HTTP status class used when surfacing this error over a transport.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthorityError::NotFound(_)
            | AuthorityError::Disabled(_)
            | AuthorityError::BadCredentials(_) => 400,
            AuthorityError::Forbidden(_) => 403,
            AuthorityError::ServiceUnavailable(_) => 503,
            AuthorityError::Store(_) => 500,
        }
    }
}
