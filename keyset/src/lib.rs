//! Key-type management framework.
//!
//! This crate carries the machinery that turns serialized key material into
//! runtime cryptographic primitives:
//! - [`key`]: key descriptors, keyset entries, templates
//! - [`manager`]: the per-type validate/create/instantiate contract
//! - [`registry`]: type-url to manager resolution with registration policy
//! - [`primitive_set`]: enabled primitives tagged with output prefixes
//! - [`handle`]: in-memory keyset assembly and primitive-set construction
//!
//! The registry is an explicit object owned by the composition root; there
//! is no process-wide singleton.

mod error;
pub mod handle;
pub mod key;
pub mod manager;
pub mod primitive_set;
pub mod registry;

pub use error::{KeysetError, KeysetResult};
pub use handle::{KeysetBuilder, KeysetHandle};
pub use key::{
    KeyDescriptor, KeyMaterialType, KeyStatus, KeyTemplate, Keyset, KeysetEntry, OutputPrefixType,
};
pub use manager::KeyTypeManager;
pub use primitive_set::{PrimitiveSet, PrimitiveSetEntry};
pub use registry::KeyTypeRegistry;
