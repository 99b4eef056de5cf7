//! Human-readable date rendering for observation and forecast timestamps.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

/// English ordinal suffix for a day of month. 11, 12 and 13 take "th".
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Render `ts` (epoch seconds) in `tz` as e.g. "5th November 2024, at 14:03:09".
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn format_timestamp<Tz>(ts: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::<Utc>::from_timestamp(ts, 0)?;
    let local = utc.with_timezone(tz);
    let day = local.day();

    Some(format!(
        "{day}{} {}, at {}",
        ordinal_suffix(day),
        local.format("%B %Y"),
        local.format("%H:%M:%S"),
    ))
}

/// [`format_timestamp`] in the machine's local time zone.
pub fn format_local(ts: i64) -> Option<String> {
    format_timestamp(ts, &Local)
}
