//! The three-segment compact serialization codec.
//!
//! `base64url(header).base64url(payload).base64url(tag)`, base64url without
//! padding, exactly two separators.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use crate::error::{JwtError, JwtResult};

/// The decoded pieces of a signed compact token.
#[derive(Debug, Clone)]
pub struct RawParts {
    /// The `header.payload` portion exactly as it appeared on the wire;
    /// this is what the MAC covers.
    pub unsigned: String,
    /// Decoded header JSON text. Unparsed: header validation happens after
    /// MAC verification.
    pub header: String,
    /// Decoded payload JSON text, also unparsed until after the MAC check.
    pub payload: String,
    /// Decoded MAC tag.
    pub signature: Vec<u8>,
}

fn encode_segment(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

fn decode_segment(segment: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| JwtError::InvalidToken("invalid base64url segment".to_string()))
}

fn decode_text_segment(segment: &str) -> JwtResult<String> {
    String::from_utf8(decode_segment(segment)?)
        .map_err(|_| JwtError::InvalidToken("segment is not valid UTF-8".to_string()))
}

/// Build the unsigned `header.payload` portion for `algorithm`.
#[must_use]
pub fn create_unsigned_compact(algorithm: &str, json_payload: &str) -> String {
    let header = serde_json::json!({ "alg": algorithm }).to_string();
    format!(
        "{}.{}",
        encode_segment(header.as_bytes()),
        encode_segment(json_payload.as_bytes())
    )
}

/// Append the encoded tag to an unsigned compact.
#[must_use]
pub fn create_signed_compact(unsigned: &str, tag: &[u8]) -> String {
    format!("{unsigned}.{}", encode_segment(tag))
}

/// Split a signed compact token into its decoded parts.
///
/// # Errors
///
/// Returns [`JwtError::InvalidToken`] unless the input has exactly three
/// dot-separated segments, each strictly decodable as unpadded base64url,
/// with header and payload valid UTF-8.
pub fn split_signed_compact(compact: &str) -> JwtResult<RawParts> {
    let segments: Vec<&str> = compact.split('.').collect();
    if segments.len() != 3 {
        return Err(JwtError::InvalidToken(
            "expected 3 dot-separated segments".to_string(),
        ));
    }
    let header = decode_text_segment(segments[0])?;
    let payload = decode_text_segment(segments[1])?;
    let signature = decode_segment(segments[2])?;
    Ok(RawParts {
        unsigned: format!("{}.{}", segments[0], segments[1]),
        header,
        payload,
        signature,
    })
}

/// Check a decoded header against the bound algorithm.
///
/// The header must be a JSON object whose `alg` string equals `algorithm`
/// exactly. A `typ` field, when present, must case-insensitively equal
/// `"JWT"`. Other fields are tolerated and ignored.
///
/// # Errors
///
/// Returns [`JwtError::UnsupportedAlgorithm`] for a mismatched `alg` and
/// [`JwtError::InvalidToken`] for any other violation.
pub fn validate_header(algorithm: &str, header_json: &str) -> JwtResult<()> {
    let header: Value = serde_json::from_str(header_json)
        .map_err(|_| JwtError::InvalidToken("header is not valid JSON".to_string()))?;
    let fields = header
        .as_object()
        .ok_or_else(|| JwtError::InvalidToken("header is not a JSON object".to_string()))?;
    match fields.get("alg") {
        Some(Value::String(alg)) if alg == algorithm => {}
        Some(Value::String(other)) => {
            return Err(JwtError::UnsupportedAlgorithm(other.clone()));
        }
        Some(_) => {
            return Err(JwtError::InvalidToken("alg is not a string".to_string()));
        }
        None => {
            return Err(JwtError::InvalidToken("header is missing alg".to_string()));
        }
    }
    if let Some(typ) = fields.get("typ") {
        let typ = typ
            .as_str()
            .ok_or_else(|| JwtError::InvalidToken("typ is not a string".to_string()))?;
        if !typ.eq_ignore_ascii_case("JWT") {
            return Err(JwtError::InvalidToken("invalid typ".to_string()));
        }
    }
    Ok(())
}
