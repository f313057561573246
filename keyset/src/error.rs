//! Keyset error types.

use thiserror::Error;

/// Result alias for keyset operations.
pub type KeysetResult<T> = Result<T, KeysetError>;

/// Errors produced by the key-management framework.
#[derive(Debug, Clone, Error)]
pub enum KeysetError {
    /// A key, key format, or keyset failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A conflicting manager is already registered for the type url.
    #[error("already registered: {0}")]
    AlreadyExists(String),

    /// No manager is registered for the requested type url.
    #[error("no manager for key type: {0}")]
    NotFound(String),

    /// The operation is not supported by this key family.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A key or key format record could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}
