//! Verified JWT claim sets.

use chrono::{DateTime, Utc};

use crate::error::JwtResult;
use crate::raw::RawJwt;

/// A claim set whose MAC and validator checks have passed.
///
/// Read-only; every accessor delegates to the underlying [`RawJwt`].
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedJwt {
    inner: RawJwt,
}

impl VerifiedJwt {
    pub(crate) fn new(inner: RawJwt) -> Self {
        Self { inner }
    }

    /// Whether the issuer claim is present.
    #[must_use]
    pub fn has_issuer(&self) -> bool {
        self.inner.has_issuer()
    }

    /// The issuer claim.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::issuer`].
    pub fn issuer(&self) -> JwtResult<&str> {
        self.inner.issuer()
    }

    /// Whether the subject claim is present.
    #[must_use]
    pub fn has_subject(&self) -> bool {
        self.inner.has_subject()
    }

    /// The subject claim.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::subject`].
    pub fn subject(&self) -> JwtResult<&str> {
        self.inner.subject()
    }

    /// Whether the audience claim is present.
    #[must_use]
    pub fn has_audiences(&self) -> bool {
        self.inner.has_audiences()
    }

    /// The audience list.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::audiences`].
    pub fn audiences(&self) -> JwtResult<Vec<String>> {
        self.inner.audiences()
    }

    /// Whether the JWT id claim is present.
    #[must_use]
    pub fn has_jwt_id(&self) -> bool {
        self.inner.has_jwt_id()
    }

    /// The JWT id claim.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::jwt_id`].
    pub fn jwt_id(&self) -> JwtResult<&str> {
        self.inner.jwt_id()
    }

    /// Whether the expiration claim is present.
    #[must_use]
    pub fn has_expiration(&self) -> bool {
        self.inner.has_expiration()
    }

    /// The expiration time.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::expiration`].
    pub fn expiration(&self) -> JwtResult<DateTime<Utc>> {
        self.inner.expiration()
    }

    /// Whether the not-before claim is present.
    #[must_use]
    pub fn has_not_before(&self) -> bool {
        self.inner.has_not_before()
    }

    /// The not-before time.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::not_before`].
    pub fn not_before(&self) -> JwtResult<DateTime<Utc>> {
        self.inner.not_before()
    }

    /// Whether the issued-at claim is present.
    #[must_use]
    pub fn has_issued_at(&self) -> bool {
        self.inner.has_issued_at()
    }

    /// The issued-at time.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::issued_at`].
    pub fn issued_at(&self) -> JwtResult<DateTime<Utc>> {
        self.inner.issued_at()
    }

    /// Whether the custom claim `name` is present with a null value.
    #[must_use]
    pub fn is_null_claim(&self, name: &str) -> bool {
        self.inner.is_null_claim(name)
    }

    /// Whether the custom claim `name` is present with a boolean value.
    #[must_use]
    pub fn has_boolean_claim(&self, name: &str) -> bool {
        self.inner.has_boolean_claim(name)
    }

    /// A boolean custom claim.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::boolean_claim`].
    pub fn boolean_claim(&self, name: &str) -> JwtResult<bool> {
        self.inner.boolean_claim(name)
    }

    /// Whether the custom claim `name` is present with a numeric value.
    #[must_use]
    pub fn has_number_claim(&self, name: &str) -> bool {
        self.inner.has_number_claim(name)
    }

    /// A numeric custom claim.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::number_claim`].
    pub fn number_claim(&self, name: &str) -> JwtResult<f64> {
        self.inner.number_claim(name)
    }

    /// Whether the custom claim `name` is present with a string value.
    #[must_use]
    pub fn has_string_claim(&self, name: &str) -> bool {
        self.inner.has_string_claim(name)
    }

    /// A string custom claim.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::string_claim`].
    pub fn string_claim(&self, name: &str) -> JwtResult<&str> {
        self.inner.string_claim(name)
    }

    /// Whether the custom claim `name` is present with an object value.
    #[must_use]
    pub fn has_json_object_claim(&self, name: &str) -> bool {
        self.inner.has_json_object_claim(name)
    }

    /// A JSON-object custom claim, serialized.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::json_object_claim`].
    pub fn json_object_claim(&self, name: &str) -> JwtResult<String> {
        self.inner.json_object_claim(name)
    }

    /// Whether the custom claim `name` is present with an array value.
    #[must_use]
    pub fn has_json_array_claim(&self, name: &str) -> bool {
        self.inner.has_json_array_claim(name)
    }

    /// A JSON-array custom claim, serialized.
    ///
    /// # Errors
    ///
    /// See [`RawJwt::json_array_claim`].
    pub fn json_array_claim(&self, name: &str) -> JwtResult<String> {
        self.inner.json_array_claim(name)
    }

    /// Names of all non-registered claims.
    #[must_use]
    pub fn custom_claim_names(&self) -> Vec<String> {
        self.inner.custom_claim_names()
    }

    /// The underlying claim set.
    #[must_use]
    pub fn raw(&self) -> &RawJwt {
        &self.inner
    }
}
