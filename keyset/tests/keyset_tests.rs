//! Tests for keyset assembly, prefix computation, and primitive sets.

mod common;

use common::{EchoKeyManager, ECHO_TYPE_URL};
use signet_keyset::primitive_set::{
    output_prefix, LEGACY_START_BYTE, NON_RAW_PREFIX_SIZE, TINK_START_BYTE,
};
use signet_keyset::{
    KeyStatus, KeyTemplate, KeyTypeRegistry, KeysetBuilder, KeysetError, KeysetHandle,
    OutputPrefixType, PrimitiveSet,
};

fn echo_template(prefix_type: OutputPrefixType) -> KeyTemplate {
    KeyTemplate {
        type_url: ECHO_TYPE_URL.to_string(),
        value: b"echo key bytes".to_vec(),
        prefix_type,
    }
}

fn echo_registry() -> KeyTypeRegistry<String> {
    let mut registry = KeyTypeRegistry::new();
    registry.register(EchoKeyManager, true).unwrap();
    registry
}

#[test]
fn test_tink_prefix_shape() {
    let prefix = output_prefix(OutputPrefixType::Tink, 0x0102_0304);
    assert_eq!(prefix, vec![TINK_START_BYTE, 1, 2, 3, 4]);
    assert_eq!(prefix.len(), NON_RAW_PREFIX_SIZE);
}

#[test]
fn test_legacy_and_crunchy_share_prefix_shape() {
    let legacy = output_prefix(OutputPrefixType::Legacy, 0xDEAD_BEEF);
    let crunchy = output_prefix(OutputPrefixType::Crunchy, 0xDEAD_BEEF);
    assert_eq!(legacy, crunchy);
    assert_eq!(legacy[0], LEGACY_START_BYTE);
    assert_eq!(&legacy[1..], &0xDEAD_BEEFu32.to_be_bytes());
}

#[test]
fn test_raw_prefix_is_empty() {
    assert!(output_prefix(OutputPrefixType::Raw, 42).is_empty());
}

#[test]
fn test_primitive_set_rejects_non_enabled_entries() {
    let mut set: PrimitiveSet<String> = PrimitiveSet::new();
    let disabled = set.add(
        "a".to_string(),
        1,
        KeyStatus::Disabled,
        OutputPrefixType::Tink,
    );
    assert!(matches!(disabled, Err(KeysetError::InvalidArgument(_))));
    let destroyed = set.add(
        "b".to_string(),
        2,
        KeyStatus::Destroyed,
        OutputPrefixType::Raw,
    );
    assert!(matches!(destroyed, Err(KeysetError::InvalidArgument(_))));
    assert!(set.is_empty());
}

#[test]
fn test_prefix_collisions_resolve_in_insertion_order() {
    let mut set: PrimitiveSet<String> = PrimitiveSet::new();
    set.add("first".to_string(), 7, KeyStatus::Enabled, OutputPrefixType::Tink)
        .unwrap();
    set.add("second".to_string(), 7, KeyStatus::Enabled, OutputPrefixType::Tink)
        .unwrap();
    let prefix = output_prefix(OutputPrefixType::Tink, 7);
    let matches: Vec<&str> = set
        .entries_for_prefix(&prefix)
        .iter()
        .map(|e| e.primitive().as_str())
        .collect();
    assert_eq!(matches, vec!["first", "second"]);
}

#[test]
fn test_raw_entries_keep_insertion_order() {
    let mut set: PrimitiveSet<String> = PrimitiveSet::new();
    set.add("r1".to_string(), 1, KeyStatus::Enabled, OutputPrefixType::Raw)
        .unwrap();
    set.add("t1".to_string(), 2, KeyStatus::Enabled, OutputPrefixType::Tink)
        .unwrap();
    set.add("r2".to_string(), 3, KeyStatus::Enabled, OutputPrefixType::Raw)
        .unwrap();
    let raw: Vec<&str> = set
        .raw_entries()
        .iter()
        .map(|e| e.primitive().as_str())
        .collect();
    assert_eq!(raw, vec!["r1", "r2"]);
}

#[test]
fn test_generate_new_single_key_keyset() {
    let registry = echo_registry();
    let handle = KeysetHandle::generate_new(&echo_template(OutputPrefixType::Tink), &registry)
        .unwrap();
    let keyset = handle.keyset();
    assert_eq!(keyset.entries().len(), 1);
    assert_eq!(keyset.entries()[0].key_id, keyset.primary_id());
    assert_eq!(keyset.entries()[0].status, KeyStatus::Enabled);
}

#[test]
fn test_builder_requires_primary() {
    let registry = echo_registry();
    let mut builder = KeysetBuilder::new();
    builder
        .add_new_key(&echo_template(OutputPrefixType::Raw), &registry)
        .unwrap();
    assert!(matches!(
        builder.build(),
        Err(KeysetError::InvalidArgument(_))
    ));
}

#[test]
fn test_builder_rejects_disabled_primary() {
    let registry = echo_registry();
    let mut builder = KeysetBuilder::new();
    let key_id = builder
        .add_new_key(&echo_template(OutputPrefixType::Raw), &registry)
        .unwrap();
    builder.set_primary(key_id);
    builder.set_status(key_id, KeyStatus::Disabled).unwrap();
    assert!(matches!(
        builder.build(),
        Err(KeysetError::InvalidArgument(_))
    ));
}

#[test]
fn test_builder_rejects_unknown_primary() {
    let registry = echo_registry();
    let mut builder = KeysetBuilder::new();
    let key_id = builder
        .add_new_key(&echo_template(OutputPrefixType::Raw), &registry)
        .unwrap();
    builder.set_primary(key_id.wrapping_add(1));
    assert!(matches!(
        builder.build(),
        Err(KeysetError::InvalidArgument(_))
    ));
}

#[test]
fn test_empty_keyset_rejected() {
    assert!(matches!(
        KeysetBuilder::new().build(),
        Err(KeysetError::InvalidArgument(_))
    ));
}

#[test]
fn test_primitives_skip_disabled_entries() {
    let registry = echo_registry();
    let mut builder = KeysetBuilder::new();
    let primary = builder
        .add_new_key(&echo_template(OutputPrefixType::Tink), &registry)
        .unwrap();
    let secondary = builder
        .add_new_key(&echo_template(OutputPrefixType::Raw), &registry)
        .unwrap();
    builder.set_primary(primary);
    builder.set_status(secondary, KeyStatus::Disabled).unwrap();
    let handle = builder.build().unwrap();

    let set = handle.primitives(&registry).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.primary().unwrap().key_id(), primary);
}

#[test]
fn test_fresh_key_ids_are_unique() {
    let registry = echo_registry();
    let mut builder = KeysetBuilder::new();
    let mut ids = std::collections::HashSet::new();
    for _ in 0..16 {
        let id = builder
            .add_new_key(&echo_template(OutputPrefixType::Raw), &registry)
            .unwrap();
        assert!(ids.insert(id));
        assert_ne!(id, 0);
    }
}
