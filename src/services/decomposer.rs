//! Date-field decomposition into calendar bucket keys

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::types::{DecoratedRecord, Record, NAN_SENTINEL};

/// Decorate a record with bucket keys derived from its `date_field` value.
///
/// Never fails: a missing or unparseable date degrades to the sentinel
/// month, absent year/week, and a zero timestamp. Downstream grouping
/// screens those keys out.
pub fn decorate(record: Record, date_field: &str) -> DecoratedRecord {
    match record.get(date_field).and_then(parse_date) {
        Some(instant) => {
            let date = instant.date_naive();
            DecoratedRecord {
                month: format!("{}-{}", date.year(), date.month()),
                year: Some(date.year()),
                week: Some(week_of_year(date)),
                numeric_date: instant.timestamp_millis(),
                record,
            }
        }
        None => DecoratedRecord {
            month: NAN_SENTINEL.to_string(),
            year: None,
            week: None,
            numeric_date: 0,
            record,
        },
    }
}

/// Parse a raw JSON value as a UTC calendar instant.
///
/// Accepts RFC 3339 strings, common date / date-time layouts, and JSON
/// numbers as epoch milliseconds. Date-only strings resolve to UTC midnight.
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Week-of-year: `ceil((days_since_jan1 + jan1_weekday + 1) / 7)` with the
/// weekday index counted from Sunday = 0.
///
/// Deliberately not ISO-8601 week numbering; this exact formula is part of
/// the output contract and must stay reproducible.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let Some(jan1) = NaiveDate::from_ymd_opt(date.year(), 1, 1) else {
        return 0;
    };
    let days = (date - jan1).num_days();
    let jan1_weekday = i64::from(jan1.weekday().num_days_from_sunday());
    ((days + jan1_weekday + 1) as u64).div_ceil(7) as u32
}
