//! Tests for claim validation: time windows, skew, and expected claims.

use chrono::{DateTime, Duration, Utc};
use signet_jwt::{JwtError, JwtValidator, RawJwt, RawJwtBuilder};

const NOW_SECS: i64 = 1_700_000_000;

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    ts(NOW_SECS)
}

fn token_with_expiration(exp_secs: i64) -> RawJwt {
    let mut builder = RawJwtBuilder::new();
    builder.set_expiration(ts(exp_secs));
    builder.build().unwrap()
}

fn token_with_not_before(nbf_secs: i64) -> RawJwt {
    let mut builder = RawJwtBuilder::new();
    builder.set_not_before(ts(nbf_secs));
    builder.build().unwrap()
}

#[test]
fn test_unexpired_token_accepted() {
    let validator = JwtValidator::builder().with_fixed_now(now()).build();
    validator.validate(&token_with_expiration(NOW_SECS + 1)).unwrap();
}

#[test]
fn test_expired_token_rejected() {
    let validator = JwtValidator::builder().with_fixed_now(now()).build();
    let result = validator.validate(&token_with_expiration(NOW_SECS - 1));
    assert!(matches!(result, Err(JwtError::Expired)));
}

#[test]
fn test_expiration_within_skew_accepted() {
    let validator = JwtValidator::builder()
        .with_fixed_now(now())
        .with_clock_skew(Duration::seconds(30))
        .unwrap()
        .build();
    validator.validate(&token_with_expiration(NOW_SECS - 30)).unwrap();
    let result = validator.validate(&token_with_expiration(NOW_SECS - 31));
    assert!(matches!(result, Err(JwtError::Expired)));
}

#[test]
fn test_expiration_boundary_with_skew_compensation() {
    let token = token_with_expiration(NOW_SECS + 1);

    let on_time = JwtValidator::builder().with_fixed_now(now()).build();
    on_time.validate(&token).unwrap();

    let late = JwtValidator::builder().with_fixed_now(ts(NOW_SECS + 2)).build();
    assert!(matches!(late.validate(&token), Err(JwtError::Expired)));

    let late_with_skew = JwtValidator::builder()
        .with_fixed_now(ts(NOW_SECS + 2))
        .with_clock_skew(Duration::seconds(1))
        .unwrap()
        .build();
    late_with_skew.validate(&token).unwrap();
}

#[test]
fn test_missing_expiration_accepted() {
    let validator = JwtValidator::builder().with_fixed_now(now()).build();
    validator.validate(&RawJwtBuilder::new().build().unwrap()).unwrap();
}

#[test]
fn test_ignore_expiration() {
    let validator = JwtValidator::builder()
        .with_fixed_now(now())
        .ignore_expiration()
        .build();
    validator
        .validate(&token_with_expiration(NOW_SECS - 3600))
        .unwrap();
}

#[test]
fn test_not_yet_valid_rejected() {
    let validator = JwtValidator::builder().with_fixed_now(now()).build();
    let result = validator.validate(&token_with_not_before(NOW_SECS + 1));
    assert!(matches!(result, Err(JwtError::NotYetValid)));
    validator.validate(&token_with_not_before(NOW_SECS)).unwrap();
}

#[test]
fn test_not_before_within_skew_accepted() {
    let validator = JwtValidator::builder()
        .with_fixed_now(now())
        .with_clock_skew(Duration::seconds(30))
        .unwrap()
        .build();
    validator.validate(&token_with_not_before(NOW_SECS + 30)).unwrap();
    let result = validator.validate(&token_with_not_before(NOW_SECS + 31));
    assert!(matches!(result, Err(JwtError::NotYetValid)));
}

#[test]
fn test_ignore_not_before() {
    let validator = JwtValidator::builder()
        .with_fixed_now(now())
        .ignore_not_before()
        .build();
    validator
        .validate(&token_with_not_before(NOW_SECS + 3600))
        .unwrap();
}

#[test]
fn test_clock_skew_capped_at_ten_minutes() {
    assert!(JwtValidator::builder()
        .with_clock_skew(Duration::seconds(600))
        .is_ok());
    let result = JwtValidator::builder().with_clock_skew(Duration::seconds(601));
    assert!(matches!(result, Err(JwtError::InvalidClaim(_))));
}

#[test]
fn test_issuer_match() {
    let validator = JwtValidator::builder().expect_issuer("issuer").build();
    let mut builder = RawJwtBuilder::new();
    builder.set_issuer("issuer");
    validator.validate(&builder.build().unwrap()).unwrap();

    let mut wrong = RawJwtBuilder::new();
    wrong.set_issuer("other");
    assert!(matches!(
        validator.validate(&wrong.build().unwrap()),
        Err(JwtError::InvalidIssuer)
    ));
    assert!(matches!(
        validator.validate(&RawJwtBuilder::new().build().unwrap()),
        Err(JwtError::InvalidIssuer)
    ));
}

#[test]
fn test_issuer_ignored_when_not_expected() {
    let validator = JwtValidator::builder().build();
    let mut builder = RawJwtBuilder::new();
    builder.set_issuer("anyone");
    validator.validate(&builder.build().unwrap()).unwrap();
}

#[test]
fn test_subject_match() {
    let validator = JwtValidator::builder().expect_subject("subject").build();
    let mut builder = RawJwtBuilder::new();
    builder.set_subject("subject");
    validator.validate(&builder.build().unwrap()).unwrap();

    let mut wrong = RawJwtBuilder::new();
    wrong.set_subject("other");
    assert!(matches!(
        validator.validate(&wrong.build().unwrap()),
        Err(JwtError::InvalidSubject)
    ));
}

#[test]
fn test_expected_audience_must_be_present() {
    let validator = JwtValidator::builder().expect_audience("aud-two").build();

    let mut listed = RawJwtBuilder::new();
    listed.add_audience("aud-one").add_audience("aud-two");
    validator.validate(&listed.build().unwrap()).unwrap();

    let mut missing = RawJwtBuilder::new();
    missing.add_audience("aud-one");
    assert!(matches!(
        validator.validate(&missing.build().unwrap()),
        Err(JwtError::InvalidAudience)
    ));
    assert!(matches!(
        validator.validate(&RawJwtBuilder::new().build().unwrap()),
        Err(JwtError::InvalidAudience)
    ));
}

#[test]
fn test_unexpected_audience_rejected() {
    // A token carrying audiences must not pass a validator with none expected.
    let validator = JwtValidator::builder().build();
    let mut builder = RawJwtBuilder::new();
    builder.add_audience("aud-one");
    assert!(matches!(
        validator.validate(&builder.build().unwrap()),
        Err(JwtError::InvalidAudience)
    ));
}

#[test]
fn test_expiration_checked_before_issuer() {
    let validator = JwtValidator::builder()
        .with_fixed_now(now())
        .expect_issuer("issuer")
        .build();
    let mut builder = RawJwtBuilder::new();
    builder.set_issuer("other").set_expiration(ts(NOW_SECS - 1));
    assert!(matches!(
        validator.validate(&builder.build().unwrap()),
        Err(JwtError::Expired)
    ));
}
