//! Tests for JWT HMAC key generation and validation.

use chrono::{DateTime, Utc};
use signet_jwt::hmac_key_manager::{JWT_HMAC_KEY_TYPE_URL, MIN_KEY_SIZE};
use signet_jwt::{
    templates, HashAlgorithm, JwtHmacKey, JwtHmacKeyFormat, JwtHmacKeyManager, JwtValidator,
    RawJwtBuilder,
};
use signet_keyset::{KeyTypeManager, KeysetError, OutputPrefixType};

fn format_bytes(algorithm: HashAlgorithm, key_size: usize) -> Vec<u8> {
    serde_json::to_vec(&JwtHmacKeyFormat {
        version: 0,
        algorithm,
        key_size,
    })
    .unwrap()
}

#[test]
fn test_manager_identity() {
    let manager = JwtHmacKeyManager::new();
    assert_eq!(manager.type_url(), JWT_HMAC_KEY_TYPE_URL);
    assert_eq!(manager.version(), 0);
}

#[test]
fn test_format_minimum_key_size() {
    let manager = JwtHmacKeyManager::new();
    assert!(manager
        .validate_key_format(&format_bytes(HashAlgorithm::Sha256, MIN_KEY_SIZE - 1))
        .is_err());
    manager
        .validate_key_format(&format_bytes(HashAlgorithm::Sha256, MIN_KEY_SIZE))
        .unwrap();
}

#[test]
fn test_format_rejects_unknown_algorithm() {
    let manager = JwtHmacKeyManager::new();
    let result = manager.validate_key_format(&format_bytes(HashAlgorithm::Unknown, 32));
    assert!(matches!(result, Err(KeysetError::InvalidArgument(_))));
}

#[test]
fn test_format_rejects_newer_version() {
    let manager = JwtHmacKeyManager::new();
    let bytes = serde_json::to_vec(&JwtHmacKeyFormat {
        version: 1,
        algorithm: HashAlgorithm::Sha256,
        key_size: 32,
    })
    .unwrap();
    assert!(matches!(
        manager.validate_key_format(&bytes),
        Err(KeysetError::InvalidArgument(_))
    ));
}

#[test]
fn test_format_rejects_garbage() {
    let manager = JwtHmacKeyManager::new();
    assert!(matches!(
        manager.validate_key_format(b"not json"),
        Err(KeysetError::Serialization(_))
    ));
}

#[test]
fn test_create_key_matches_format() {
    let manager = JwtHmacKeyManager::new();
    let descriptor = manager
        .create_key(&format_bytes(HashAlgorithm::Sha384, 48))
        .unwrap();
    assert_eq!(descriptor.type_url, JWT_HMAC_KEY_TYPE_URL);
    manager.validate_key(&descriptor).unwrap();

    let key: JwtHmacKey = serde_json::from_slice(&descriptor.value).unwrap();
    assert_eq!(key.algorithm, HashAlgorithm::Sha384);
    assert_eq!(key.key_value.len(), 48);
}

#[test]
fn test_created_keys_are_distinct() {
    let manager = JwtHmacKeyManager::new();
    let format = format_bytes(HashAlgorithm::Sha256, 32);
    let a: JwtHmacKey =
        serde_json::from_slice(&manager.create_key(&format).unwrap().value).unwrap();
    let b: JwtHmacKey =
        serde_json::from_slice(&manager.create_key(&format).unwrap().value).unwrap();
    assert_ne!(a.key_value, b.key_value);
}

#[test]
fn test_validate_key_rejects_wrong_type_url() {
    let manager = JwtHmacKeyManager::new();
    let mut descriptor = manager
        .create_key(&format_bytes(HashAlgorithm::Sha256, 32))
        .unwrap();
    descriptor.type_url = "type.signet.dev/signet.OtherKey".to_string();
    assert!(manager.validate_key(&descriptor).is_err());
}

#[test]
fn test_validate_key_rejects_short_material() {
    let manager = JwtHmacKeyManager::new();
    let key = JwtHmacKey {
        version: 0,
        algorithm: HashAlgorithm::Sha256,
        key_value: vec![7u8; MIN_KEY_SIZE - 1],
    };
    let mut descriptor = manager
        .create_key(&format_bytes(HashAlgorithm::Sha256, 32))
        .unwrap();
    descriptor.value = serde_json::to_vec(&key).unwrap();
    assert!(manager.validate_key(&descriptor).is_err());
}

#[test]
fn test_primitive_round_trips_a_token() {
    let manager = JwtHmacKeyManager::new();
    let descriptor = manager
        .create_key(&format_bytes(HashAlgorithm::Sha512, 64))
        .unwrap();
    let mac = manager.primitive(&descriptor).unwrap();

    let mut builder = RawJwtBuilder::new();
    builder.set_issuer("issuer");
    let compact = mac.compute_mac_and_encode(&builder.build().unwrap()).unwrap();
    let validator = JwtValidator::builder()
        .with_fixed_now(DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap())
        .build();
    let verified = mac.verify_mac_and_decode(&compact, &validator).unwrap();
    assert_eq!(verified.issuer().unwrap(), "issuer");
}

#[test]
fn test_derive_key_unsupported() {
    let manager = JwtHmacKeyManager::new();
    let mut seed: &[u8] = &[0u8; 64];
    let result = manager.derive_key(&format_bytes(HashAlgorithm::Sha256, 32), &mut seed);
    assert!(matches!(result, Err(KeysetError::Unsupported(_))));
}

#[test]
fn test_templates_encode_expected_formats() {
    let cases = [
        (templates::hs256_template(), HashAlgorithm::Sha256, 32, OutputPrefixType::Tink),
        (templates::hs384_template(), HashAlgorithm::Sha384, 48, OutputPrefixType::Tink),
        (templates::hs512_template(), HashAlgorithm::Sha512, 64, OutputPrefixType::Tink),
        (templates::raw_hs256_template(), HashAlgorithm::Sha256, 32, OutputPrefixType::Raw),
    ];
    for (template, algorithm, key_size, prefix_type) in cases {
        assert_eq!(template.type_url, JWT_HMAC_KEY_TYPE_URL);
        assert_eq!(template.prefix_type, prefix_type);
        let format: JwtHmacKeyFormat = serde_json::from_slice(&template.value).unwrap();
        assert_eq!(format.version, 0);
        assert_eq!(format.algorithm, algorithm);
        assert_eq!(format.key_size, key_size);
    }
}
