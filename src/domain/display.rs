// src/domain/display.rs

use base64::Engine;
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::title::ParsedTitle;
use crate::domain::visit::VisitRecord;

const VISIT_GID_PREFIX: &str = "gid://Jobber/Visit/";
const MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/";
pub const UNKNOWN_SALESPERSON: &str = "Unknown";

static SLASH_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s/\s").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

/// Calendar and link settings shared by every formatted visit.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// All weekday/date/time fields are read in this zone.
    pub timezone: Tz,
    /// Appended to map searches, e.g. "Spokane,WA".
    pub map_locality: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Los_Angeles,
            map_locality: "Spokane,WA".to_string(),
        }
    }
}

/// Presentation attributes of a single visit.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    pub date: String,
    pub weekday: Weekday,
    pub time: String,
    pub salesperson: String,
    pub visit_url: String,
    pub map_url: String,
}

impl DisplayFields {
    pub fn new(visit: &VisitRecord, title: &ParsedTitle, cfg: &FormatterConfig) -> Self {
        let start = visit.start_at.with_timezone(&cfg.timezone);

        Self {
            date: format_short_date(&visit.start_at, cfg.timezone),
            weekday: start.weekday(),
            time: format_time_range(&visit.start_at, &visit.end_at, cfg.timezone),
            salesperson: display_salesperson(visit),
            visit_url: visit_url(visit),
            map_url: map_url(title.address_or("?"), &cfg.map_locality),
        }
    }
}

/// "Mon 6/9"
pub fn format_short_date(at: &DateTime<FixedOffset>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%a %-m/%-d").to_string()
}

/// 12-hour times without the AM/PM suffix. A start at midnight or an end at
/// 23:59 means that boundary was never set and is left out.
pub fn format_time_range(
    start: &DateTime<FixedOffset>,
    end: &DateTime<FixedOffset>,
    tz: Tz,
) -> String {
    let start = start.with_timezone(&tz);
    let end = end.with_timezone(&tz);

    let start_set = !(start.hour() == 0 && start.minute() == 0);
    let end_set = !(end.hour() == 23 && end.minute() == 59);

    let clock = |t: &DateTime<Tz>| t.format("%-I:%M").to_string();

    match (start_set, end_set) {
        (true, true) => format!("{}-{}", clock(&start), clock(&end)),
        (true, false) => clock(&start),
        (false, true) => clock(&end),
        (false, false) => String::new(),
    }
}

pub fn display_salesperson(visit: &VisitRecord) -> String {
    visit
        .salesperson_first()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_SALESPERSON)
        .to_string()
}

/// Trailing visit number of the opaque id. Ids that are not base64 are used as-is.
pub fn visit_number(id: &str) -> String {
    let engine = &base64::engine::general_purpose::STANDARD;
    let decoded = engine
        .decode(id)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(id))
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match decoded {
        Some(gid) => gid.replacen(VISIT_GID_PREFIX, "", 1),
        None => id.to_string(),
    }
}

pub fn visit_url(visit: &VisitRecord) -> String {
    format!(
        "{}?appointment_id={}",
        visit.job.jobber_web_uri,
        visit_number(&visit.id)
    )
}

pub fn map_url(address: &str, locality: &str) -> String {
    let query = SLASH_SEPARATOR.replace_all(address, "+");
    let query = WHITESPACE.replace_all(&query, "+");
    format!("{MAPS_PLACE_URL}{query}+{locality}")
}
