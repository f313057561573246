//! Key management for the JWT HMAC family.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use signet_keyset::{
    KeyDescriptor, KeyMaterialType, KeyTypeManager, KeysetError, KeysetResult,
};

use crate::mac::HmacMac;
use crate::token_mac::{JwtMac, JwtMacImpl};

/// Type identifier of JWT HMAC keys.
pub const JWT_HMAC_KEY_TYPE_URL: &str = "type.signet.dev/signet.JwtHmacKey";

/// Minimum HMAC key size in bytes.
pub const MIN_KEY_SIZE: usize = 32;

const KEY_VERSION: u32 = 0;

/// Hash algorithm bound to a JWT HMAC key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// Zero value carried by uninitialized records; always rejected.
    #[serde(rename = "UNKNOWN")]
    Unknown,
    /// HMAC-SHA256, header algorithm `HS256`.
    #[serde(rename = "SHA256")]
    Sha256,
    /// HMAC-SHA384, header algorithm `HS384`.
    #[serde(rename = "SHA384")]
    Sha384,
    /// HMAC-SHA512, header algorithm `HS512`.
    #[serde(rename = "SHA512")]
    Sha512,
}

impl HashAlgorithm {
    fn header_name(self) -> KeysetResult<&'static str> {
        match self {
            HashAlgorithm::Sha256 => Ok("HS256"),
            HashAlgorithm::Sha384 => Ok("HS384"),
            HashAlgorithm::Sha512 => Ok("HS512"),
            HashAlgorithm::Unknown => Err(KeysetError::InvalidArgument(
                "hash algorithm UNKNOWN is not supported".to_string(),
            )),
        }
    }
}

/// Generation parameters for a new JWT HMAC key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtHmacKeyFormat {
    /// Format version; must not exceed the manager version.
    pub version: u32,
    /// Hash algorithm for generated keys.
    pub algorithm: HashAlgorithm,
    /// Key size in bytes.
    pub key_size: usize,
}

/// A materialized JWT HMAC key record.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct JwtHmacKey {
    /// Key record version.
    #[zeroize(skip)]
    pub version: u32,
    /// Hash algorithm the key is bound to.
    #[zeroize(skip)]
    pub algorithm: HashAlgorithm,
    /// Raw key material.
    pub key_value: Vec<u8>,
}

impl std::fmt::Debug for JwtHmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHmacKey")
            .field("version", &self.version)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Generates JWT HMAC keys and builds [`JwtMac`] primitives from them.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtHmacKeyManager;

impl JwtHmacKeyManager {
    /// Create the manager.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn decode_format(format: &[u8]) -> KeysetResult<JwtHmacKeyFormat> {
    serde_json::from_slice(format)
        .map_err(|e| KeysetError::Serialization(format!("bad JwtHmacKeyFormat: {e}")))
}

fn decode_key(key: &KeyDescriptor) -> KeysetResult<JwtHmacKey> {
    if key.type_url != JWT_HMAC_KEY_TYPE_URL {
        return Err(KeysetError::InvalidArgument(format!(
            "wrong type url: {}",
            key.type_url
        )));
    }
    serde_json::from_slice(&key.value)
        .map_err(|e| KeysetError::Serialization(format!("bad JwtHmacKey: {e}")))
}

fn check_key_size(size: usize) -> KeysetResult<()> {
    if size < MIN_KEY_SIZE {
        return Err(KeysetError::InvalidArgument(format!(
            "key too short: {size} bytes, minimum is {MIN_KEY_SIZE}"
        )));
    }
    Ok(())
}

impl KeyTypeManager<Box<dyn JwtMac>> for JwtHmacKeyManager {
    fn type_url(&self) -> &'static str {
        JWT_HMAC_KEY_TYPE_URL
    }

    fn version(&self) -> u32 {
        KEY_VERSION
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key_format(&self, format: &[u8]) -> KeysetResult<()> {
        let format = decode_format(format)?;
        if format.version > self.version() {
            return Err(KeysetError::InvalidArgument(format!(
                "format version {} is newer than {}",
                format.version,
                self.version()
            )));
        }
        format.algorithm.header_name()?;
        check_key_size(format.key_size)
    }

    fn create_key(&self, format: &[u8]) -> KeysetResult<KeyDescriptor> {
        self.validate_key_format(format)?;
        let format = decode_format(format)?;
        let mut key_value = vec![0u8; format.key_size];
        rand::rng().fill_bytes(&mut key_value);
        let key = JwtHmacKey {
            version: KEY_VERSION,
            algorithm: format.algorithm,
            key_value,
        };
        let value = serde_json::to_vec(&key)
            .map_err(|e| KeysetError::Serialization(e.to_string()))?;
        Ok(KeyDescriptor {
            type_url: JWT_HMAC_KEY_TYPE_URL.to_string(),
            value,
            material: KeyMaterialType::Symmetric,
            version: KEY_VERSION,
        })
    }

    fn validate_key(&self, key: &KeyDescriptor) -> KeysetResult<()> {
        let key = decode_key(key)?;
        if key.version > self.version() {
            return Err(KeysetError::InvalidArgument(format!(
                "key version {} is newer than {}",
                key.version,
                self.version()
            )));
        }
        key.algorithm.header_name()?;
        check_key_size(key.key_value.len())
    }

    fn primitive(&self, key: &KeyDescriptor) -> KeysetResult<Box<dyn JwtMac>> {
        self.validate_key(key)?;
        let key = decode_key(key)?;
        let algorithm = key.algorithm.header_name()?;
        let mac = match key.algorithm {
            HashAlgorithm::Sha256 => HmacMac::sha256(&key.key_value),
            HashAlgorithm::Sha384 => HmacMac::sha384(&key.key_value),
            HashAlgorithm::Sha512 => HmacMac::sha512(&key.key_value),
            HashAlgorithm::Unknown => {
                return Err(KeysetError::InvalidArgument(
                    "hash algorithm UNKNOWN is not supported".to_string(),
                ));
            }
        }
        .map_err(|e| KeysetError::InvalidArgument(e.to_string()))?;
        Ok(Box::new(JwtMacImpl::new(Box::new(mac), algorithm)))
    }

    fn derive_key(
        &self,
        _format: &[u8],
        _seed: &mut dyn std::io::Read,
    ) -> KeysetResult<KeyDescriptor> {
        // Deliberate: this key family does not support seeded derivation.
        Err(KeysetError::Unsupported(
            "JWT HMAC keys cannot be derived from a seed stream".to_string(),
        ))
    }
}
