//! Token expiry calculations.
//!
//! Carrier token endpoints report lifetimes as `expires_in` seconds relative to the moment the
//! token was issued. These helpers turn that into an absolute expiry and decide whether a
//! stored token can still be used for a carrier call.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Tokens this close to expiry are treated as already expired.
///
/// A token that passes the check must still be valid when the carrier receives the request.
pub const TOKEN_EXPIRY_LEEWAY: TimeDelta = TimeDelta::seconds(60);

/// Absolute expiry of a token issued at `issued_at` with lifetime `expires_in`.
///
/// Computed in whole milliseconds (`expires_in * 1000`), so a 3600 second token issued at `T`
/// expires at exactly `T + 3_600_000` ms.
///
/// Returns `None` when the expiry falls outside the representable date range.
///
/// # Example
/// ```ignore
/// let issued_at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
/// let expires_at = token_expires_at(issued_at, Duration::from_secs(3600));
/// // expires_at == Some(2025-01-15 11:00:00 UTC)
/// ```
pub fn token_expires_at(issued_at: DateTime<Utc>, expires_in: Duration) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(expires_in.as_secs()).ok()?.checked_mul(1000)?;

    issued_at.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Whether a token expiring at `expires_at` should no longer be used at `now`.
pub fn is_token_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at - TOKEN_EXPIRY_LEEWAY <= now
}
