//! The algorithm-bound JWT MAC primitive.

use crate::error::{JwtError, JwtResult};
use crate::format;
use crate::mac::RawMac;
use crate::raw::RawJwt;
use crate::validator::JwtValidator;
use crate::verified::VerifiedJwt;

/// Computes and verifies MAC-signed compact tokens.
pub trait JwtMac: Send + Sync {
    /// Serialize `token` and sign it into a compact token.
    ///
    /// # Errors
    ///
    /// Fails only when claim serialization or the underlying MAC fails.
    fn compute_mac_and_encode(&self, token: &RawJwt) -> JwtResult<String>;

    /// Verify a compact token and validate its claims.
    ///
    /// # Errors
    ///
    /// Returns format errors for malformed input, [`JwtError::InvalidMac`]
    /// uniformly on tag mismatch, and validator errors after the MAC check.
    fn verify_mac_and_decode(
        &self,
        compact: &str,
        validator: &JwtValidator,
    ) -> JwtResult<VerifiedJwt>;
}

/// A [`JwtMac`] over one raw MAC bound to one algorithm name.
pub struct JwtMacImpl {
    mac: Box<dyn RawMac>,
    algorithm: String,
}

impl JwtMacImpl {
    /// Bind `mac` to `algorithm` (the header `alg` value).
    #[must_use]
    pub fn new(mac: Box<dyn RawMac>, algorithm: impl Into<String>) -> Self {
        Self {
            mac,
            algorithm: algorithm.into(),
        }
    }

    /// The bound algorithm name.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }
}

impl JwtMac for JwtMacImpl {
    fn compute_mac_and_encode(&self, token: &RawJwt) -> JwtResult<String> {
        let payload = token.to_json_payload()?;
        let unsigned = format::create_unsigned_compact(&self.algorithm, &payload);
        let tag = self.mac.compute(unsigned.as_bytes())?;
        Ok(format::create_signed_compact(&unsigned, &tag))
    }

    fn verify_mac_and_decode(
        &self,
        compact: &str,
        validator: &JwtValidator,
    ) -> JwtResult<VerifiedJwt> {
        let parts = format::split_signed_compact(compact)?;
        // The MAC must pass before header or claim content is interpreted.
        self.mac
            .verify(&parts.signature, parts.unsigned.as_bytes())
            .map_err(|_| JwtError::InvalidMac)?;
        format::validate_header(&self.algorithm, &parts.header)?;
        let token = RawJwt::from_json_payload(&parts.payload)?;
        validator.validate(&token)?;
        Ok(VerifiedJwt::new(token))
    }
}

impl std::fmt::Debug for JwtMacImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtMacImpl")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
