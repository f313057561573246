//! JSON Web Token MAC primitives bound to the signet keyset framework.
//!
//! This crate provides:
//! - [`RawJwt`]/[`RawJwtBuilder`]: immutable claim sets with typed access
//! - [`JwtValidator`]: issuer/subject/audience and time-window validation
//! - [`format`]: the three-segment compact serialization codec
//! - [`JwtHmacKeyManager`]: HS256/HS384/HS512 key generation and primitives
//! - [`JwtMacKeyset`]: the multi-key wrapper with output-prefix routing
//!
//! Typical flow: register [`JwtHmacKeyManager`] in a
//! [`KeyTypeRegistry`](signet_keyset::KeyTypeRegistry), generate a keyset
//! from a [`template`](templates), wrap it with [`keyset_jwt_mac`], then
//! compute and verify tokens through the wrapper.

mod error;
pub mod format;
pub mod hmac_key_manager;
pub mod mac;
pub mod raw;
pub mod templates;
pub mod token_mac;
pub mod validator;
pub mod verified;
pub mod wrapper;

pub use error::{JwtError, JwtResult};
pub use hmac_key_manager::{HashAlgorithm, JwtHmacKey, JwtHmacKeyFormat, JwtHmacKeyManager};
pub use raw::{RawJwt, RawJwtBuilder};
pub use token_mac::{JwtMac, JwtMacImpl};
pub use validator::{JwtValidator, JwtValidatorBuilder};
pub use verified::VerifiedJwt;
pub use wrapper::{keyset_jwt_mac, JwtMacKeyset};
