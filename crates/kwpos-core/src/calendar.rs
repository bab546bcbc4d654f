//! # Calendar Module
//!
//! The fixed reporting timezone and business-date helpers.
//!
//! All timestamps are stored in UTC. Every place the system talks about a
//! *calendar date* — daily reports, `?date=` filters, the year baked into
//! sale/refund numbers, CSV date/time columns — goes through this module so
//! that "today" means the same thing everywhere: the date in Kuwait (UTC+3,
//! no daylight saving), never the ambient server timezone.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::{ValidationError, ValidationResult};

/// Offset of the reporting timezone from UTC, in seconds. Kuwait is UTC+3
/// year-round.
pub const REPORTING_OFFSET_SECS: i32 = 3 * 3600;

/// The fixed reporting timezone.
pub fn reporting_offset() -> FixedOffset {
    // 10800 seconds is always in range, so this cannot fail
    FixedOffset::east_opt(REPORTING_OFFSET_SECS).expect("valid fixed offset")
}

/// The calendar date of a UTC timestamp, in the reporting timezone.
///
/// ## Example
/// 2026-03-01T22:30:00Z is already 2026-03-02 in Kuwait.
pub fn business_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&reporting_offset()).date_naive()
}

/// The year used to scope sale/refund number sequences for a timestamp.
pub fn business_year(ts: DateTime<Utc>) -> i32 {
    use chrono::Datelike;
    business_date(ts).year()
}

/// UTC half-open bounds `[start, end)` of one business date.
///
/// Used to turn a `?date=` filter into an indexable range query instead of
/// per-row date extraction.
pub fn day_bounds_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = reporting_offset();
    let start_local = tz
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight exists"))
        .single()
        .expect("fixed offsets have no ambiguous local times");
    let start = start_local.with_timezone(&Utc);
    (start, start + Duration::days(1))
}

/// Parses a `YYYY-MM-DD` date filter from the query string.
pub fn parse_date(s: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "must be YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
