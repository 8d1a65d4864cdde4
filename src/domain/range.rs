// src/domain/range.rs

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// The work week the list opens on: the coming Sunday 00:00 (a week out when
/// today is already Sunday) through the following Friday 23:59:59.
pub fn default_week(now: DateTime<Tz>) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let tz = now.timezone();
    let today = now.date_naive();
    let until_sunday = 7 - today.weekday().num_days_from_sunday();
    let sunday = today + Days::new(u64::from(until_sunday));
    let friday = sunday + Days::new(5);
    (start_of_day(tz, sunday), end_of_day(tz, friday))
}

/// Accepts an RFC 3339 instant or a bare `YYYY-MM-DD` date; bare dates snap
/// to the start or end of that day in `tz`.
pub fn parse_bound(raw: &str, tz: Tz, is_end: bool) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(if is_end {
        end_of_day(tz, day)
    } else {
        start_of_day(tz, day)
    })
}

pub fn start_of_day(tz: Tz, day: NaiveDate) -> DateTime<FixedOffset> {
    localize(tz, day.and_time(NaiveTime::default()))
}

pub fn end_of_day(tz: Tz, day: NaiveDate) -> DateTime<FixedOffset> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default();
    localize(tz, day.and_time(last_second))
}

fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<FixedOffset> {
    // Nonexistent wall times (DST gaps) are read as UTC.
    tz.from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
        .fixed_offset()
}
