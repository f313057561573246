//! JWT error types.

use signet_keyset::KeysetError;
use thiserror::Error;

/// Result alias for JWT operations.
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors produced by JWT operations.
///
/// Verification failures carry distinct kinds for testability; the
/// multi-key wrapper collapses per-key outcomes into [`JwtError::InvalidMac`]
/// so callers cannot learn which key almost matched.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    /// The compact token is malformed.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The MAC did not verify.
    #[error("invalid JWT MAC")]
    InvalidMac,

    /// The token's expiration time has passed.
    #[error("token has expired")]
    Expired,

    /// The token's not-before time has not been reached.
    #[error("token cannot yet be used")]
    NotYetValid,

    /// The issuer claim is missing or does not match.
    #[error("invalid issuer")]
    InvalidIssuer,

    /// The subject claim is missing or does not match.
    #[error("invalid subject")]
    InvalidSubject,

    /// The audience claim is missing, unexpected, or does not match.
    #[error("invalid audience")]
    InvalidAudience,

    /// A registered claim name was used through the custom-claim API.
    #[error("{0} is a registered claim name")]
    RegisteredClaimName(String),

    /// A claim is missing or has the wrong JSON kind.
    #[error("invalid claim: {0}")]
    InvalidClaim(String),

    /// The token's header algorithm is not the bound algorithm.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The key is unusable.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A claim set or header could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An error from the keyset framework.
    #[error(transparent)]
    Keyset(#[from] KeysetError),
}
