//! Resolution of type identifiers to key-type managers.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{KeysetError, KeysetResult};
use crate::key::{KeyDescriptor, KeyTemplate};
use crate::manager::KeyTypeManager;

struct Registration<P> {
    manager: Arc<dyn KeyTypeManager<P>>,
    manager_type: TypeId,
    new_key_allowed: bool,
}

/// Maps a type url to its [`KeyTypeManager`], with at-most-one registration
/// per type and a per-type new-key policy.
///
/// The registry is built once at startup by the composition root and then
/// only read. Re-registering the same manager type is idempotent and may
/// tighten, but never relax, the new-key policy; registering a different
/// manager for an existing type url is a configuration error.
pub struct KeyTypeRegistry<P> {
    registrations: HashMap<String, Registration<P>>,
}

impl<P> KeyTypeRegistry<P> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
        }
    }

    /// Register `manager` for its type url.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::AlreadyExists`] when a different manager type
    /// already claims the url, or when the registration would re-enable key
    /// generation that an earlier registration forbade.
    pub fn register<M>(&mut self, manager: M, new_key_allowed: bool) -> KeysetResult<()>
    where
        M: KeyTypeManager<P> + 'static,
    {
        let type_url = manager.type_url();
        if let Some(existing) = self.registrations.get_mut(type_url) {
            if existing.manager_type != TypeId::of::<M>() {
                return Err(KeysetError::AlreadyExists(format!(
                    "{type_url} is already handled by a different manager"
                )));
            }
            if new_key_allowed && !existing.new_key_allowed {
                return Err(KeysetError::AlreadyExists(format!(
                    "{type_url} is registered with key generation forbidden; cannot re-enable"
                )));
            }
            existing.new_key_allowed = new_key_allowed;
            return Ok(());
        }
        tracing::debug!(type_url, new_key_allowed, "registered key type");
        self.registrations.insert(
            type_url.to_string(),
            Registration {
                manager: Arc::new(manager),
                manager_type: TypeId::of::<M>(),
                new_key_allowed,
            },
        );
        Ok(())
    }

    /// Look up the manager for `type_url`.
    ///
    /// # Errors
    ///
    /// Returns [`KeysetError::NotFound`] for an unregistered type.
    pub fn get(&self, type_url: &str) -> KeysetResult<&dyn KeyTypeManager<P>> {
        self.registrations
            .get(type_url)
            .map(|r| r.manager.as_ref())
            .ok_or_else(|| KeysetError::NotFound(type_url.to_string()))
    }

    /// Generate a new key from `template`, honoring the new-key policy.
    ///
    /// # Errors
    ///
    /// Fails for unregistered types, types registered with key generation
    /// forbidden, and formats that do not validate.
    pub fn new_key(&self, template: &KeyTemplate) -> KeysetResult<KeyDescriptor> {
        let registration = self
            .registrations
            .get(&template.type_url)
            .ok_or_else(|| KeysetError::NotFound(template.type_url.clone()))?;
        if !registration.new_key_allowed {
            return Err(KeysetError::InvalidArgument(format!(
                "key generation is forbidden for {}",
                template.type_url
            )));
        }
        registration.manager.validate_key_format(&template.value)?;
        registration.manager.create_key(&template.value)
    }

    /// Validate `key` and construct its runtime primitive.
    ///
    /// # Errors
    ///
    /// Fails for unregistered types and keys that do not validate.
    pub fn primitive(&self, key: &KeyDescriptor) -> KeysetResult<P> {
        let manager = self.get(&key.type_url)?;
        manager.validate_key(key)?;
        manager.primitive(key)
    }
}

impl<P> Default for KeyTypeRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
