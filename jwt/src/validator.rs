//! Token validation options and checks.

use chrono::{DateTime, Duration, Utc};

use crate::error::{JwtError, JwtResult};
use crate::raw::RawJwt;

/// Largest accepted clock skew.
const MAX_CLOCK_SKEW_SECONDS: i64 = 600;

/// Validation configuration applied to claim sets after MAC verification.
///
/// Built once via [`JwtValidatorBuilder`], then reused across verify calls;
/// stateless apart from reading the clock when no fixed now is set.
#[derive(Debug, Clone)]
pub struct JwtValidator {
    expected_issuer: Option<String>,
    expected_subject: Option<String>,
    expected_audience: Option<String>,
    clock_skew: Duration,
    fixed_now: Option<DateTime<Utc>>,
    ignore_expiration: bool,
    ignore_not_before: bool,
}

impl JwtValidator {
    /// Start building a validator.
    #[must_use]
    pub fn builder() -> JwtValidatorBuilder {
        JwtValidatorBuilder::new()
    }

    /// Check `token` against this configuration.
    ///
    /// All timestamp comparisons are at whole-second resolution. A missing
    /// expiration claim is permitted; a present one is strictly enforced
    /// unless expiration checking was switched off.
    ///
    /// # Errors
    ///
    /// The first failing check wins: [`JwtError::Expired`],
    /// [`JwtError::NotYetValid`], [`JwtError::InvalidIssuer`],
    /// [`JwtError::InvalidSubject`], or [`JwtError::InvalidAudience`].
    pub fn validate(&self, token: &RawJwt) -> JwtResult<()> {
        let now = self.now();
        if !self.ignore_expiration && token.has_expiration() {
            let expiration = token.expiration()?;
            if expiration < now - self.clock_skew {
                return Err(JwtError::Expired);
            }
        }
        if !self.ignore_not_before && token.has_not_before() {
            let not_before = token.not_before()?;
            if not_before > now + self.clock_skew {
                return Err(JwtError::NotYetValid);
            }
        }
        if let Some(expected) = &self.expected_issuer {
            if !token.has_issuer() || token.issuer()? != expected {
                return Err(JwtError::InvalidIssuer);
            }
        }
        if let Some(expected) = &self.expected_subject {
            if !token.has_subject() || token.subject()? != expected {
                return Err(JwtError::InvalidSubject);
            }
        }
        match &self.expected_audience {
            Some(expected) => {
                if !token.has_audiences() || !token.audiences()?.iter().any(|a| a == expected) {
                    return Err(JwtError::InvalidAudience);
                }
            }
            None => {
                if token.has_audiences() {
                    return Err(JwtError::InvalidAudience);
                }
            }
        }
        Ok(())
    }

    fn now(&self) -> DateTime<Utc> {
        let now = self.fixed_now.unwrap_or_else(Utc::now);
        // Sub-second precision does not survive the signing round-trip.
        DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
    }
}

/// Accumulates validator options; terminal [`build`](Self::build) produces
/// the immutable [`JwtValidator`].
#[derive(Debug, Clone)]
pub struct JwtValidatorBuilder {
    expected_issuer: Option<String>,
    expected_subject: Option<String>,
    expected_audience: Option<String>,
    clock_skew: Duration,
    fixed_now: Option<DateTime<Utc>>,
    ignore_expiration: bool,
    ignore_not_before: bool,
}

impl JwtValidatorBuilder {
    /// Create a builder with zero clock skew and the wall clock as now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_issuer: None,
            expected_subject: None,
            expected_audience: None,
            clock_skew: Duration::zero(),
            fixed_now: None,
            ignore_expiration: false,
            ignore_not_before: false,
        }
    }

    /// Require an exactly matching issuer claim.
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Require an exactly matching subject claim.
    pub fn expect_subject(mut self, subject: impl Into<String>) -> Self {
        self.expected_subject = Some(subject.into());
        self
    }

    /// Require the audience list to contain this value.
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    /// Tolerate up to `clock_skew` of clock drift in both directions.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::InvalidClaim`] for a skew above ten minutes.
    pub fn with_clock_skew(mut self, clock_skew: Duration) -> JwtResult<Self> {
        if clock_skew > Duration::seconds(MAX_CLOCK_SKEW_SECONDS) {
            return Err(JwtError::InvalidClaim(
                "clock skew too large, max is 10 minutes".to_string(),
            ));
        }
        self.clock_skew = clock_skew;
        Ok(self)
    }

    /// Evaluate time-based claims against `now` instead of the wall clock.
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// Skip the expiration check even when the claim is present.
    pub fn ignore_expiration(mut self) -> Self {
        self.ignore_expiration = true;
        self
    }

    /// Skip the not-before check even when the claim is present.
    pub fn ignore_not_before(mut self) -> Self {
        self.ignore_not_before = true;
        self
    }

    /// Produce the immutable validator.
    #[must_use]
    pub fn build(self) -> JwtValidator {
        JwtValidator {
            expected_issuer: self.expected_issuer,
            expected_subject: self.expected_subject,
            expected_audience: self.expected_audience,
            clock_skew: self.clock_skew,
            fixed_now: self.fixed_now,
            ignore_expiration: self.ignore_expiration,
            ignore_not_before: self.ignore_not_before,
        }
    }
}

impl Default for JwtValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
