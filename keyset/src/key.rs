//! Key descriptors, keyset entries, and key templates.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Classification of the key material held by a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMaterialType {
    /// Secret symmetric key material.
    Symmetric,
    /// Private half of an asymmetric key pair.
    AsymmetricPrivate,
    /// Public half of an asymmetric key pair.
    AsymmetricPublic,
    /// A reference to key material held elsewhere.
    Remote,
}

/// Status of a keyset entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyStatus {
    /// The key may be used for all operations.
    Enabled,
    /// The key is retained but must not be used.
    Disabled,
    /// The key material has been destroyed.
    Destroyed,
}

/// Controls whether and how a key-identifying prefix is attached to the
/// primitive's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputPrefixType {
    /// 5-byte prefix: `0x01` start byte followed by the big-endian key id.
    Tink,
    /// 5-byte prefix: `0x00` start byte followed by the big-endian key id.
    Legacy,
    /// No prefix.
    Raw,
    /// Same wire prefix as [`OutputPrefixType::Legacy`].
    Crunchy,
}

/// A serialized key bound to its type.
///
/// Immutable once validated by its [`KeyTypeManager`](crate::KeyTypeManager).
/// The serialized key record is wiped when the descriptor is dropped.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyDescriptor {
    /// Type identifier resolving to a registered manager.
    #[zeroize(skip)]
    pub type_url: String,
    /// Opaque serialized key record, interpreted only by the manager.
    pub value: Vec<u8>,
    /// Classification of the contained material.
    #[zeroize(skip)]
    pub material: KeyMaterialType,
    /// Key record version.
    #[zeroize(skip)]
    pub version: u32,
}

impl std::fmt::Debug for KeyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyDescriptor")
            .field("type_url", &self.type_url)
            .field("material", &self.material)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// A key plus the keyset-level metadata needed to use it.
#[derive(Debug, Clone)]
pub struct KeysetEntry {
    /// The key itself.
    pub key: KeyDescriptor,
    /// Numeric identifier, unique within the keyset.
    pub key_id: u32,
    /// Whether the key may be used.
    pub status: KeyStatus,
    /// Output prefix scheme for this entry.
    pub prefix_type: OutputPrefixType,
}

/// Parameters for generating a new key of some type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyTemplate {
    /// Type identifier of the key family.
    pub type_url: String,
    /// Opaque serialized key format, interpreted only by the manager.
    pub value: Vec<u8>,
    /// Output prefix scheme for keys generated from this template.
    pub prefix_type: OutputPrefixType,
}

/// An ordered set of keys with a single primary entry.
///
/// Invariants, enforced by [`KeysetBuilder`](crate::KeysetBuilder): key ids
/// are unique, exactly one entry is primary, and the primary is enabled.
/// The keyset lives in memory only; container persistence is a concern of
/// the caller.
#[derive(Debug, Clone)]
pub struct Keyset {
    pub(crate) entries: Vec<KeysetEntry>,
    pub(crate) primary_id: u32,
}

impl Keyset {
    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[KeysetEntry] {
        &self.entries
    }

    /// Id of the primary entry.
    #[must_use]
    pub fn primary_id(&self) -> u32 {
        self.primary_id
    }

    /// Look up an entry by key id.
    #[must_use]
    pub fn entry(&self, key_id: u32) -> Option<&KeysetEntry> {
        self.entries.iter().find(|e| e.key_id == key_id)
    }
}
