//! Shared test fixtures: a trivial key type whose primitive echoes its key
//! material as a string.

use signet_keyset::{
    KeyDescriptor, KeyMaterialType, KeyTypeManager, KeysetError, KeysetResult,
};

pub const ECHO_TYPE_URL: &str = "type.test/test.EchoKey";

/// Key manager for tests; the "primitive" is the key bytes as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoKeyManager;

impl KeyTypeManager<String> for EchoKeyManager {
    fn type_url(&self) -> &'static str {
        ECHO_TYPE_URL
    }

    fn version(&self) -> u32 {
        0
    }

    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    fn validate_key_format(&self, format: &[u8]) -> KeysetResult<()> {
        if format.is_empty() {
            return Err(KeysetError::InvalidArgument("empty format".to_string()));
        }
        Ok(())
    }

    fn create_key(&self, format: &[u8]) -> KeysetResult<KeyDescriptor> {
        self.validate_key_format(format)?;
        Ok(KeyDescriptor {
            type_url: ECHO_TYPE_URL.to_string(),
            value: format.to_vec(),
            material: KeyMaterialType::Symmetric,
            version: 0,
        })
    }

    fn validate_key(&self, key: &KeyDescriptor) -> KeysetResult<()> {
        if key.value.is_empty() {
            return Err(KeysetError::InvalidArgument("empty key".to_string()));
        }
        if key.version > self.version() {
            return Err(KeysetError::InvalidArgument("version skew".to_string()));
        }
        Ok(())
    }

    fn primitive(&self, key: &KeyDescriptor) -> KeysetResult<String> {
        Ok(String::from_utf8_lossy(&key.value).into_owned())
    }
}
