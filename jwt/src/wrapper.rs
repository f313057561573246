//! The multi-key JWT MAC wrapper.
//!
//! Wire tokens at the keyset boundary are bytes: non-RAW entries prepend a
//! fixed 5-byte output prefix (start byte plus big-endian key id) to the
//! ASCII compact token, and that prefix is not valid UTF-8 in general. A
//! RAW-only keyset produces the plain compact token.

use signet_keyset::primitive_set::{LEGACY_START_BYTE, NON_RAW_PREFIX_SIZE, TINK_START_BYTE};
use signet_keyset::{KeyTypeRegistry, KeysetHandle, PrimitiveSet};

use crate::error::{JwtError, JwtResult};
use crate::raw::RawJwt;
use crate::token_mac::JwtMac;
use crate::validator::JwtValidator;
use crate::verified::VerifiedJwt;

/// A composite [`JwtMac`]-style primitive over every enabled key of a
/// keyset.
///
/// New tokens always come from the primary key. Verification first tries
/// the entries whose output prefix matches the input, in keyset insertion
/// order, then falls back to every RAW entry in insertion order. Per-key
/// failure reasons are collapsed into one generic error.
pub struct JwtMacKeyset {
    set: PrimitiveSet<Box<dyn JwtMac>>,
}

/// Build the composite JWT MAC for `handle`, resolving each enabled key
/// through `registry`.
///
/// # Errors
///
/// Fails when a key does not resolve or the keyset has no enabled primary.
pub fn keyset_jwt_mac(
    handle: &KeysetHandle,
    registry: &KeyTypeRegistry<Box<dyn JwtMac>>,
) -> JwtResult<JwtMacKeyset> {
    let set = handle.primitives(registry)?;
    if set.primary().is_none() {
        return Err(JwtError::InvalidKey(
            "keyset has no enabled primary key".to_string(),
        ));
    }
    Ok(JwtMacKeyset { set })
}

impl JwtMacKeyset {
    /// Sign `token` with the primary key; the output carries the primary's
    /// output prefix (none for RAW).
    ///
    /// # Errors
    ///
    /// Fails when claim serialization or the underlying MAC fails.
    pub fn compute_mac_and_encode(&self, token: &RawJwt) -> JwtResult<Vec<u8>> {
        let primary = self
            .set
            .primary()
            .ok_or_else(|| JwtError::InvalidKey("keyset has no primary".to_string()))?;
        let compact = primary.primitive().compute_mac_and_encode(token)?;
        let mut out = primary.prefix().to_vec();
        out.extend_from_slice(compact.as_bytes());
        Ok(out)
    }

    /// Verify `token` against the keyset and validate its claims.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidMac`] when no key verifies the token;
    /// which key almost matched is never reported.
    pub fn verify_mac_and_decode(
        &self,
        token: &[u8],
        validator: &JwtValidator,
    ) -> JwtResult<VerifiedJwt> {
        if token.len() > NON_RAW_PREFIX_SIZE
            && (token[0] == TINK_START_BYTE || token[0] == LEGACY_START_BYTE)
        {
            let (prefix, rest) = token.split_at(NON_RAW_PREFIX_SIZE);
            if let Ok(compact) = std::str::from_utf8(rest) {
                for entry in self.set.entries_for_prefix(prefix) {
                    if let Ok(verified) = entry.primitive().verify_mac_and_decode(compact, validator)
                    {
                        return Ok(verified);
                    }
                }
                tracing::trace!(
                    prefix = %hex::encode(prefix),
                    "no prefixed key verified the token, trying raw entries"
                );
            }
        }
        if let Ok(compact) = std::str::from_utf8(token) {
            for entry in self.set.raw_entries() {
                if let Ok(verified) = entry.primitive().verify_mac_and_decode(compact, validator) {
                    return Ok(verified);
                }
            }
        }
        Err(JwtError::InvalidMac)
    }
}
