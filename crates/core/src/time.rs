//! Timestamp parsing for `updatedAt`-style fields.
//!
//! Records arrive from a remote table client that emits either full RFC 3339
//! timestamps or bare calendar dates. Both are normalized to UTC so groups can
//! compare recency as calendar time rather than string order.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{DomainError, DomainResult};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (taken as UTC midnight).
pub fn parse_timestamp(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    // Postgres-style "2024-01-01 10:00:00+00" without the `T` separator.
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(DomainError::invalid_timestamp(raw.to_string()))
}
