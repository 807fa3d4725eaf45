//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for visit dates.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse an RFC 3339 timestamp (the form timestamps take inside documents).
///
/// # Errors
///
/// Returns the `chrono` parse error when `text` is not RFC 3339.
pub fn parse_rfc3339(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|ts| ts.with_timezone(&Utc))
}
