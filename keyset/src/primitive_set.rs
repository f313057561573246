//! Sets of primitives tagged with output prefixes.

use std::collections::HashMap;

use crate::error::{KeysetError, KeysetResult};
use crate::key::{KeyStatus, OutputPrefixType};

/// Start byte of a TINK output prefix.
pub const TINK_START_BYTE: u8 = 0x01;
/// Start byte of a LEGACY or CRUNCHY output prefix.
pub const LEGACY_START_BYTE: u8 = 0x00;
/// Size of every non-RAW output prefix: start byte plus big-endian key id.
pub const NON_RAW_PREFIX_SIZE: usize = 5;

/// Compute the output prefix for a key id under a prefix scheme.
///
/// RAW produces no prefix; every other scheme produces a fixed
/// [`NON_RAW_PREFIX_SIZE`]-byte prefix binding the key id.
#[must_use]
pub fn output_prefix(prefix_type: OutputPrefixType, key_id: u32) -> Vec<u8> {
    let start = match prefix_type {
        OutputPrefixType::Raw => return Vec::new(),
        OutputPrefixType::Tink => TINK_START_BYTE,
        OutputPrefixType::Legacy | OutputPrefixType::Crunchy => LEGACY_START_BYTE,
    };
    let mut prefix = Vec::with_capacity(NON_RAW_PREFIX_SIZE);
    prefix.push(start);
    prefix.extend_from_slice(&key_id.to_be_bytes());
    prefix
}

/// A single primitive plus the keyset metadata needed to select it.
pub struct PrimitiveSetEntry<P> {
    primitive: P,
    key_id: u32,
    prefix_type: OutputPrefixType,
    prefix: Vec<u8>,
}

impl<P> PrimitiveSetEntry<P> {
    /// The wrapped primitive.
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Numeric key identifier.
    #[must_use]
    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    /// Output prefix scheme of this entry.
    #[must_use]
    pub fn prefix_type(&self) -> OutputPrefixType {
        self.prefix_type
    }

    /// Output prefix bytes; empty for RAW entries.
    #[must_use]
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }
}

/// A multiplexing set of enabled primitives, at most one of them primary.
///
/// Entries keep keyset insertion order; prefix collisions between entries
/// resolve in that order.
pub struct PrimitiveSet<P> {
    entries: Vec<PrimitiveSetEntry<P>>,
    by_prefix: HashMap<Vec<u8>, Vec<usize>>,
    primary: Option<usize>,
}

impl<P> PrimitiveSet<P> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_prefix: HashMap::new(),
            primary: None,
        }
    }

    /// Add a primitive for an enabled keyset entry.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] for entries that are not
    /// enabled; disabled and destroyed keys never join a primitive set.
    pub fn add(
        &mut self,
        primitive: P,
        key_id: u32,
        status: KeyStatus,
        prefix_type: OutputPrefixType,
    ) -> KeysetResult<()> {
        if status != KeyStatus::Enabled {
            return Err(KeysetError::InvalidArgument(format!(
                "key {key_id} is not enabled"
            )));
        }
        let prefix = output_prefix(prefix_type, key_id);
        let index = self.entries.len();
        if !prefix.is_empty() {
            self.by_prefix.entry(prefix.clone()).or_default().push(index);
        }
        self.entries.push(PrimitiveSetEntry {
            primitive,
            key_id,
            prefix_type,
            prefix,
        });
        Ok(())
    }

    /// Mark the entry with `key_id` as primary.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] when no entry has that id.
    pub fn set_primary(&mut self, key_id: u32) -> KeysetResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.key_id == key_id)
            .ok_or_else(|| {
                KeysetError::InvalidArgument(format!("no entry with key id {key_id}"))
            })?;
        self.primary = Some(index);
        Ok(())
    }

    /// The primary entry, if one has been set.
    pub fn primary(&self) -> Option<&PrimitiveSetEntry<P>> {
        self.primary.map(|i| &self.entries[i])
    }

    /// Entries whose output prefix equals `prefix`, in insertion order.
    pub fn entries_for_prefix(&self, prefix: &[u8]) -> Vec<&PrimitiveSetEntry<P>> {
        self.by_prefix
            .get(prefix)
            .map(|indices| indices.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// RAW (prefixless) entries, in insertion order.
    pub fn raw_entries(&self) -> Vec<&PrimitiveSetEntry<P>> {
        self.entries
            .iter()
            .filter(|e| e.prefix_type == OutputPrefixType::Raw)
            .collect()
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[PrimitiveSetEntry<P>] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P> Default for PrimitiveSet<P> {
    fn default() -> Self {
        Self::new()
    }
}
