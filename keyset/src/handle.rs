//! In-memory keyset assembly.

use rand::Rng;

use crate::error::{KeysetError, KeysetResult};
use crate::key::{KeyStatus, KeyTemplate, Keyset, KeysetEntry};
use crate::primitive_set::PrimitiveSet;
use crate::registry::KeyTypeRegistry;

/// Owns a validated [`Keyset`] and builds primitive sets from it.
#[derive(Debug, Clone)]
pub struct KeysetHandle {
    keyset: Keyset,
}

impl KeysetHandle {
    /// Generate a single-key keyset from `template`; the fresh key is
    /// enabled and primary.
    ///
    /// # Errors
    ///
    /// Fails when the registry cannot generate a key for the template.
    pub fn generate_new<P>(
        template: &KeyTemplate,
        registry: &KeyTypeRegistry<P>,
    ) -> KeysetResult<Self> {
        let mut builder = KeysetBuilder::new();
        let key_id = builder.add_new_key(template, registry)?;
        builder.set_primary(key_id);
        builder.build()
    }

    /// Start building a multi-key keyset.
    #[must_use]
    pub fn builder() -> KeysetBuilder {
        KeysetBuilder::new()
    }

    /// The underlying keyset.
    #[must_use]
    pub fn keyset(&self) -> &Keyset {
        &self.keyset
    }

    /// Resolve every enabled entry through `registry` into a
    /// [`PrimitiveSet`] with the keyset's primary marked.
    ///
    /// Disabled and destroyed entries are skipped.
    ///
    /// # Errors
    ///
    /// Fails when a key does not validate or its type is unregistered.
    pub fn primitives<P>(&self, registry: &KeyTypeRegistry<P>) -> KeysetResult<PrimitiveSet<P>> {
        let mut set = PrimitiveSet::new();
        for entry in &self.keyset.entries {
            if entry.status != KeyStatus::Enabled {
                tracing::warn!(key_id = entry.key_id, "skipping non-enabled keyset entry");
                continue;
            }
            let primitive = registry.primitive(&entry.key)?;
            set.add(primitive, entry.key_id, entry.status, entry.prefix_type)?;
        }
        set.set_primary(self.keyset.primary_id)?;
        Ok(set)
    }
}

/// Accumulates keyset entries and validates the keyset invariants on
/// `build`: at least one entry, unique key ids, and an enabled primary.
#[derive(Debug, Clone)]
pub struct KeysetBuilder {
    entries: Vec<KeysetEntry>,
    primary_id: Option<u32>,
}

impl KeysetBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            primary_id: None,
        }
    }

    /// Generate a key from `template` and append it enabled; returns the
    /// fresh key id.
    ///
    /// # Errors
    ///
    /// Fails when the registry cannot generate a key for the template.
    pub fn add_new_key<P>(
        &mut self,
        template: &KeyTemplate,
        registry: &KeyTypeRegistry<P>,
    ) -> KeysetResult<u32> {
        let key = registry.new_key(template)?;
        let key_id = self.fresh_key_id();
        tracing::debug!(key_id, type_url = %template.type_url, "added keyset entry");
        self.entries.push(KeysetEntry {
            key,
            key_id,
            status: KeyStatus::Enabled,
            prefix_type: template.prefix_type,
        });
        Ok(key_id)
    }

    /// Mark `key_id` as the primary entry.
    pub fn set_primary(&mut self, key_id: u32) -> &mut Self {
        self.primary_id = Some(key_id);
        self
    }

    /// Change the status of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] when no entry has that id.
    pub fn set_status(&mut self, key_id: u32, status: KeyStatus) -> KeysetResult<&mut Self> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.key_id == key_id)
            .ok_or_else(|| {
                KeysetError::InvalidArgument(format!("no entry with key id {key_id}"))
            })?;
        entry.status = status;
        Ok(self)
    }

    /// Validate the keyset invariants and produce a handle.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::InvalidArgument`] for an empty keyset, a
    /// missing or unknown primary, or a primary that is not enabled.
    pub fn build(self) -> KeysetResult<KeysetHandle> {
        if self.entries.is_empty() {
            return Err(KeysetError::InvalidArgument("keyset is empty".to_string()));
        }
        let primary_id = self
            .primary_id
            .ok_or_else(|| KeysetError::InvalidArgument("keyset has no primary".to_string()))?;
        let primary = self
            .entries
            .iter()
            .find(|e| e.key_id == primary_id)
            .ok_or_else(|| {
                KeysetError::InvalidArgument(format!("primary id {primary_id} is not in the keyset"))
            })?;
        if primary.status != KeyStatus::Enabled {
            return Err(KeysetError::InvalidArgument(
                "primary key is not enabled".to_string(),
            ));
        }
        Ok(KeysetHandle {
            keyset: Keyset {
                entries: self.entries,
                primary_id,
            },
        })
    }

    fn fresh_key_id(&self) -> u32 {
        loop {
            let id: u32 = rand::rng().random();
            if id != 0 && !self.entries.iter().any(|e| e.key_id == id) {
                return id;
            }
        }
    }
}

impl Default for KeysetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
