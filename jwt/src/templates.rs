//! Key templates for the JWT HMAC family.

use signet_keyset::{KeyTemplate, OutputPrefixType};

use crate::hmac_key_manager::{HashAlgorithm, JwtHmacKeyFormat, JWT_HMAC_KEY_TYPE_URL};

fn template(
    algorithm: HashAlgorithm,
    key_size: usize,
    prefix_type: OutputPrefixType,
) -> KeyTemplate {
    let format = JwtHmacKeyFormat {
        version: 0,
        algorithm,
        key_size,
    };
    // Serializing a fixed plain record cannot fail.
    let value = serde_json::to_vec(&format).unwrap_or_default();
    KeyTemplate {
        type_url: JWT_HMAC_KEY_TYPE_URL.to_string(),
        value,
        prefix_type,
    }
}

/// HS256 with a 256-bit key and a TINK output prefix.
#[must_use]
pub fn hs256_template() -> KeyTemplate {
    template(HashAlgorithm::Sha256, 32, OutputPrefixType::Tink)
}

/// HS384 with a 384-bit key and a TINK output prefix.
#[must_use]
pub fn hs384_template() -> KeyTemplate {
    template(HashAlgorithm::Sha384, 48, OutputPrefixType::Tink)
}

/// HS512 with a 512-bit key and a TINK output prefix.
#[must_use]
pub fn hs512_template() -> KeyTemplate {
    template(HashAlgorithm::Sha512, 64, OutputPrefixType::Tink)
}

/// HS256 with a 256-bit key and no output prefix.
#[must_use]
pub fn raw_hs256_template() -> KeyTemplate {
    template(HashAlgorithm::Sha256, 32, OutputPrefixType::Raw)
}
