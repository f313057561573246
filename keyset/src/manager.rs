//! The per-key-type management contract.

use std::io::Read;

use crate::error::{KeysetError, KeysetResult};
use crate::key::{KeyDescriptor, KeyMaterialType};

/// Per-type key logic: validate formats, mint keys, and construct the
/// runtime primitive `P` from a validated key.
///
/// Managers are stateless with respect to the keys they handle and safe to
/// share across threads. Dispatch is by interface object through a
/// [`KeyTypeRegistry`](crate::KeyTypeRegistry).
pub trait KeyTypeManager<P>: Send + Sync {
    /// Type identifier this manager handles.
    fn type_url(&self) -> &'static str;

    /// Highest key record version this manager understands.
    fn version(&self) -> u32;

    /// Classification of the material in keys of this type.
    fn key_material_type(&self) -> KeyMaterialType;

    /// Check a serialized key format for out-of-range sizes or unsupported
    /// algorithm values.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] for a format that must not
    /// be used to generate keys.
    fn validate_key_format(&self, format: &[u8]) -> KeysetResult<()>;

    /// Generate a fresh key from a format.
    ///
    /// Key material comes from a cryptographically secure random source.
    /// Never fails for a format that passed [`validate_key_format`].
    ///
    /// [`validate_key_format`]: KeyTypeManager::validate_key_format
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] if the format is invalid.
    fn create_key(&self, format: &[u8]) -> KeysetResult<KeyDescriptor>;

    /// Check a materialized key: version compatibility plus the same size
    /// and algorithm constraints as format validation.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] for a key that must not be
    /// used.
    fn validate_key(&self, key: &KeyDescriptor) -> KeysetResult<()>;

    /// Construct the runtime primitive for a validated key.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] for unsupported algorithm
    /// values or malformed key records.
    fn primitive(&self, key: &KeyDescriptor) -> KeysetResult<P>;

    /// Derive a key deterministically from a seed stream.
    ///
    /// Not supported by default; key families opt in explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::Unsupported`] unless overridden.
    fn derive_key(
        &self,
        _format: &[u8],
        _seed: &mut dyn Read,
    ) -> KeysetResult<KeyDescriptor> {
        Err(KeysetError::Unsupported(format!(
            "key derivation is not available for {}",
            self.type_url()
        )))
    }
}
