//! Raw JWT claim sets.
//!
//! A [`RawJwt`] is an unverified bag of claims: either assembled locally
//! through [`RawJwtBuilder`] before signing, or parsed from a compact token
//! payload and not yet validated. Registered claims (RFC 7519 §4.1) have
//! typed accessors and are off limits to the custom-claim API.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{JwtError, JwtResult};

const CLAIM_ISSUER: &str = "iss";
const CLAIM_SUBJECT: &str = "sub";
const CLAIM_AUDIENCE: &str = "aud";
const CLAIM_EXPIRATION: &str = "exp";
const CLAIM_NOT_BEFORE: &str = "nbf";
const CLAIM_ISSUED_AT: &str = "iat";
const CLAIM_JWT_ID: &str = "jti";

fn is_registered_claim_name(name: &str) -> bool {
    matches!(
        name,
        CLAIM_ISSUER
            | CLAIM_SUBJECT
            | CLAIM_AUDIENCE
            | CLAIM_EXPIRATION
            | CLAIM_NOT_BEFORE
            | CLAIM_ISSUED_AT
            | CLAIM_JWT_ID
    )
}

fn timestamp_from_secs(secs: i64, name: &str) -> JwtResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| JwtError::InvalidClaim(format!("{name} is out of range")))
}

/// An immutable claim set.
///
/// `aud` is always held as a list of strings, even when the parsed payload
/// carried a singular string. Timestamps are whole Unix-epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct RawJwt {
    claims: Map<String, Value>,
}

impl RawJwt {
    /// Parse a claim set from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when the payload is not a JSON
    /// object or the `aud` claim is neither a string nor a list of strings.
    pub fn from_json_payload(json: &str) -> JwtResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| JwtError::InvalidClaim(format!("payload is not valid JSON: {e}")))?;
        let Value::Object(mut claims) = value else {
            return Err(JwtError::InvalidClaim(
                "payload is not a JSON object".to_string(),
            ));
        };
        // Normalize a singular audience into a one-element list.
        if let Some(aud) = claims.get_mut(CLAIM_AUDIENCE) {
            match aud {
                Value::String(s) => {
                    let s = std::mem::take(s);
                    *aud = Value::Array(vec![Value::String(s)]);
                }
                Value::Array(items) => {
                    if !items.iter().all(Value::is_string) {
                        return Err(JwtError::InvalidClaim(
                            "aud must be a list of strings".to_string(),
                        ));
                    }
                }
                _ => {
                    return Err(JwtError::InvalidClaim(
                        "aud is neither a string nor a list".to_string(),
                    ));
                }
            }
        }
        Ok(Self { claims })
    }

    /// Serialize the claim set to its canonical JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Serialization`] when encoding fails.
    pub fn to_json_payload(&self) -> JwtResult<String> {
        serde_json::to_string(&self.claims).map_err(|e| JwtError::Serialization(e.to_string()))
    }

    /// Whether the issuer claim is present.
    #[must_use]
    pub fn has_issuer(&self) -> bool {
        self.claims.contains_key(CLAIM_ISSUER)
    }

    /// The issuer claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or not a string.
    pub fn issuer(&self) -> JwtResult<&str> {
        self.string_claim_value(CLAIM_ISSUER)
    }

    /// Whether the subject claim is present.
    #[must_use]
    pub fn has_subject(&self) -> bool {
        self.claims.contains_key(CLAIM_SUBJECT)
    }

    /// The subject claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or not a string.
    pub fn subject(&self) -> JwtResult<&str> {
        self.string_claim_value(CLAIM_SUBJECT)
    }

    /// Whether the audience claim is present.
    #[must_use]
    pub fn has_audiences(&self) -> bool {
        self.claims.contains_key(CLAIM_AUDIENCE)
    }

    /// The audience list.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or malformed.
    pub fn audiences(&self) -> JwtResult<Vec<String>> {
        let aud = self
            .claims
            .get(CLAIM_AUDIENCE)
            .and_then(Value::as_array)
            .ok_or_else(|| JwtError::InvalidClaim("aud is not a list".to_string()))?;
        aud.iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| JwtError::InvalidClaim("aud entry is not a string".to_string()))
            })
            .collect()
    }

    /// Whether the JWT id claim is present.
    #[must_use]
    pub fn has_jwt_id(&self) -> bool {
        self.claims.contains_key(CLAIM_JWT_ID)
    }

    /// The JWT id claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or not a string.
    pub fn jwt_id(&self) -> JwtResult<&str> {
        self.string_claim_value(CLAIM_JWT_ID)
    }

    /// Whether the expiration claim is present.
    #[must_use]
    pub fn has_expiration(&self) -> bool {
        self.claims.contains_key(CLAIM_EXPIRATION)
    }

    /// The expiration time, truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or not a number.
    pub fn expiration(&self) -> JwtResult<DateTime<Utc>> {
        self.timestamp_claim_value(CLAIM_EXPIRATION)
    }

    /// Whether the not-before claim is present.
    #[must_use]
    pub fn has_not_before(&self) -> bool {
        self.claims.contains_key(CLAIM_NOT_BEFORE)
    }

    /// The not-before time, truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or not a number.
    pub fn not_before(&self) -> JwtResult<DateTime<Utc>> {
        self.timestamp_claim_value(CLAIM_NOT_BEFORE)
    }

    /// Whether the issued-at claim is present.
    #[must_use]
    pub fn has_issued_at(&self) -> bool {
        self.claims.contains_key(CLAIM_ISSUED_AT)
    }

    /// The issued-at time, truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or not a number.
    pub fn issued_at(&self) -> JwtResult<DateTime<Utc>> {
        self.timestamp_claim_value(CLAIM_ISSUED_AT)
    }

    /// Whether the custom claim `name` is present with a null value.
    #[must_use]
    pub fn is_null_claim(&self, name: &str) -> bool {
        matches!(self.claims.get(name), Some(Value::Null))
    }

    /// Whether the custom claim `name` is present with a boolean value.
    #[must_use]
    pub fn has_boolean_claim(&self, name: &str) -> bool {
        matches!(self.claims.get(name), Some(Value::Bool(_)))
    }

    /// A boolean custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or of another kind.
    pub fn boolean_claim(&self, name: &str) -> JwtResult<bool> {
        self.claims
            .get(name)
            .and_then(Value::as_bool)
            .ok_or_else(|| JwtError::InvalidClaim(format!("{name} is not a boolean claim")))
    }

    /// Whether the custom claim `name` is present with a numeric value.
    #[must_use]
    pub fn has_number_claim(&self, name: &str) -> bool {
        matches!(self.claims.get(name), Some(Value::Number(_)))
    }

    /// A numeric custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or of another kind.
    pub fn number_claim(&self, name: &str) -> JwtResult<f64> {
        self.claims
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| JwtError::InvalidClaim(format!("{name} is not a number claim")))
    }

    /// Whether the custom claim `name` is present with a string value.
    #[must_use]
    pub fn has_string_claim(&self, name: &str) -> bool {
        matches!(self.claims.get(name), Some(Value::String(_)))
    }

    /// A string custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or of another kind.
    pub fn string_claim(&self, name: &str) -> JwtResult<&str> {
        self.claims
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| JwtError::InvalidClaim(format!("{name} is not a string claim")))
    }

    /// Whether the custom claim `name` is present with an object value.
    #[must_use]
    pub fn has_json_object_claim(&self, name: &str) -> bool {
        matches!(self.claims.get(name), Some(Value::Object(_)))
    }

    /// A JSON-object custom claim, serialized.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or of another kind.
    pub fn json_object_claim(&self, name: &str) -> JwtResult<String> {
        match self.claims.get(name) {
            Some(value @ Value::Object(_)) => {
                serde_json::to_string(value).map_err(|e| JwtError::Serialization(e.to_string()))
            }
            _ => Err(JwtError::InvalidClaim(format!(
                "{name} is not a JSON object claim"
            ))),
        }
    }

    /// Whether the custom claim `name` is present with an array value.
    #[must_use]
    pub fn has_json_array_claim(&self, name: &str) -> bool {
        matches!(self.claims.get(name), Some(Value::Array(_)))
    }

    /// A JSON-array custom claim, serialized.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] when absent or of another kind.
    pub fn json_array_claim(&self, name: &str) -> JwtResult<String> {
        match self.claims.get(name) {
            Some(value @ Value::Array(_)) => {
                serde_json::to_string(value).map_err(|e| JwtError::Serialization(e.to_string()))
            }
            _ => Err(JwtError::InvalidClaim(format!(
                "{name} is not a JSON array claim"
            ))),
        }
    }

    /// Names of all non-registered claims, sorted by name.
    #[must_use]
    pub fn custom_claim_names(&self) -> Vec<String> {
        self.claims
            .keys()
            .filter(|name| !is_registered_claim_name(name))
            .cloned()
            .collect()
    }

    fn string_claim_value(&self, name: &str) -> JwtResult<&str> {
        self.claims
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| JwtError::InvalidClaim(format!("{name} is not a string claim")))
    }

    fn timestamp_claim_value(&self, name: &str) -> JwtResult<DateTime<Utc>> {
        let secs = self
            .claims
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| JwtError::InvalidClaim(format!("{name} is not a numeric claim")))?;
        timestamp_from_secs(secs as i64, name)
    }
}

/// Accumulates claims and produces an immutable [`RawJwt`].
///
/// Registered-claim setters chain by reference; custom-claim adders return
/// a result and leave the builder untouched when the name is registered.
#[derive(Debug, Clone, Default)]
pub struct RawJwtBuilder {
    claims: Map<String, Value>,
}

impl RawJwtBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { claims: Map::new() }
    }

    /// Set the issuer claim.
    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.claims
            .insert(CLAIM_ISSUER.to_string(), Value::String(issuer.into()));
        self
    }

    /// Set the subject claim.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.claims
            .insert(CLAIM_SUBJECT.to_string(), Value::String(subject.into()));
        self
    }

    /// Append an audience; `aud` is always a list.
    pub fn add_audience(&mut self, audience: impl Into<String>) -> &mut Self {
        let aud = self
            .claims
            .entry(CLAIM_AUDIENCE.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = aud {
            items.push(Value::String(audience.into()));
        }
        self
    }

    /// Set the JWT id claim.
    pub fn set_jwt_id(&mut self, jwt_id: impl Into<String>) -> &mut Self {
        self.claims
            .insert(CLAIM_JWT_ID.to_string(), Value::String(jwt_id.into()));
        self
    }

    /// Set the expiration claim, truncated to whole seconds.
    pub fn set_expiration(&mut self, expiration: DateTime<Utc>) -> &mut Self {
        self.set_timestamp(CLAIM_EXPIRATION, expiration)
    }

    /// Set the not-before claim, truncated to whole seconds.
    pub fn set_not_before(&mut self, not_before: DateTime<Utc>) -> &mut Self {
        self.set_timestamp(CLAIM_NOT_BEFORE, not_before)
    }

    /// Set the issued-at claim, truncated to whole seconds.
    pub fn set_issued_at(&mut self, issued_at: DateTime<Utc>) -> &mut Self {
        self.set_timestamp(CLAIM_ISSUED_AT, issued_at)
    }

    /// Add a null custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::RegisteredClaimName`] for registered names; the
    /// builder is left unchanged.
    pub fn add_null_claim(&mut self, name: impl Into<String>) -> JwtResult<&mut Self> {
        self.add_custom_claim(name.into(), Value::Null)
    }

    /// Add a boolean custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::RegisteredClaimName`] for registered names; the
    /// builder is left unchanged.
    pub fn add_boolean_claim(
        &mut self,
        name: impl Into<String>,
        value: bool,
    ) -> JwtResult<&mut Self> {
        self.add_custom_claim(name.into(), Value::Bool(value))
    }

    /// Add a numeric custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::RegisteredClaimName`] for registered names; the
    /// builder is left unchanged.
    pub fn add_number_claim(
        &mut self,
        name: impl Into<String>,
        value: f64,
    ) -> JwtResult<&mut Self> {
        let number = serde_json::Number::from_f64(value)
            .ok_or_else(|| JwtError::InvalidClaim("number claim is not finite".to_string()))?;
        self.add_custom_claim(name.into(), Value::Number(number))
    }

    /// Add a string custom claim.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::RegisteredClaimName`] for registered names; the
    /// builder is left unchanged.
    pub fn add_string_claim(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> JwtResult<&mut Self> {
        self.add_custom_claim(name.into(), Value::String(value.into()))
    }

    /// Add a JSON-object custom claim from its serialized form.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::RegisteredClaimName`] for registered names and
    /// [`JwtError::InvalidClaim`] when `json` is not a JSON object; the
    /// builder is left unchanged either way.
    pub fn add_json_object_claim(
        &mut self,
        name: impl Into<String>,
        json: &str,
    ) -> JwtResult<&mut Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| JwtError::InvalidClaim(format!("claim is not valid JSON: {e}")))?;
        if !value.is_object() {
            return Err(JwtError::InvalidClaim(
                "claim is not a JSON object".to_string(),
            ));
        }
        self.add_custom_claim(name.into(), value)
    }

    /// Add a JSON-array custom claim from its serialized form.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::RegisteredClaimName`] for registered names and
    /// [`JwtError::InvalidClaim`] when `json` is not a JSON array; the
    /// builder is left unchanged either way.
    pub fn add_json_array_claim(
        &mut self,
        name: impl Into<String>,
        json: &str,
    ) -> JwtResult<&mut Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| JwtError::InvalidClaim(format!("claim is not valid JSON: {e}")))?;
        if !value.is_array() {
            return Err(JwtError::InvalidClaim(
                "claim is not a JSON array".to_string(),
            ));
        }
        self.add_custom_claim(name.into(), value)
    }

    /// Produce the immutable claim set.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with the
    /// parsing constructor.
    pub fn build(&self) -> JwtResult<RawJwt> {
        Ok(RawJwt {
            claims: self.claims.clone(),
        })
    }

    fn set_timestamp(&mut self, name: &str, value: DateTime<Utc>) -> &mut Self {
        self.claims
            .insert(name.to_string(), Value::from(value.timestamp()));
        self
    }

    fn add_custom_claim(&mut self, name: String, value: Value) -> JwtResult<&mut Self> {
        if is_registered_claim_name(&name) {
            return Err(JwtError::RegisteredClaimName(name));
        }
        self.claims.insert(name, value);
        Ok(self)
    }
}
