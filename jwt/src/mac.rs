//! Raw MAC adapters over the RustCrypto HMAC engine.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{JwtError, JwtResult};

/// Uniform interface over a single keyed MAC operation.
///
/// Implementations hold immutable key material and are safe for concurrent
/// use. Verification is constant-time in the tag comparison.
pub trait RawMac: Send + Sync {
    /// Compute the tag over `data`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKey`] when the engine rejects the key.
    fn compute(&self, data: &[u8]) -> JwtResult<Vec<u8>>;

    /// Verify `tag` over `data`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidMac`] uniformly on any mismatch.
    fn verify(&self, tag: &[u8], data: &[u8]) -> JwtResult<()> {
        let computed = self.compute(data)?;
        if bool::from(computed.as_slice().ct_eq(tag)) {
            Ok(())
        } else {
            Err(JwtError::InvalidMac)
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum HmacFlavor {
    Sha256,
    Sha384,
    Sha512,
}

/// Full-length HMAC over a SHA-2 flavor.
///
/// Construction is eager: an unusable key surfaces here, never
/// mid-operation. Key bytes are wiped on drop.
pub struct HmacMac {
    key: Zeroizing<Vec<u8>>,
    flavor: HmacFlavor,
}

impl HmacMac {
    /// HMAC-SHA256.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKey`] for an empty key.
    pub fn sha256(key: &[u8]) -> JwtResult<Self> {
        Self::new(key, HmacFlavor::Sha256)
    }

    /// HMAC-SHA384.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKey`] for an empty key.
    pub fn sha384(key: &[u8]) -> JwtResult<Self> {
        Self::new(key, HmacFlavor::Sha384)
    }

    /// HMAC-SHA512.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidKey`] for an empty key.
    pub fn sha512(key: &[u8]) -> JwtResult<Self> {
        Self::new(key, HmacFlavor::Sha512)
    }

    fn new(key: &[u8], flavor: HmacFlavor) -> JwtResult<Self> {
        if key.is_empty() {
            return Err(JwtError::InvalidKey("empty HMAC key".to_string()));
        }
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            flavor,
        })
    }
}

impl RawMac for HmacMac {
    fn compute(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        match self.flavor {
            HmacFlavor::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(&self.key)
                    .map_err(|_| JwtError::InvalidKey("invalid HMAC key".to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HmacFlavor::Sha384 => {
                let mut mac = Hmac::<Sha384>::new_from_slice(&self.key)
                    .map_err(|_| JwtError::InvalidKey("invalid HMAC key".to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
            HmacFlavor::Sha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(&self.key)
                    .map_err(|_| JwtError::InvalidKey("invalid HMAC key".to_string()))?;
                mac.update(data);
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }
}

impl std::fmt::Debug for HmacMac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacMac")
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}
