// src/domain/itinerary.rs

use chrono::{DateTime, FixedOffset};

use crate::domain::display::{format_short_date, DisplayFields, FormatterConfig};
use crate::domain::filters::{include, NormalizedVisit};
use crate::domain::settings::{Dialect, FilterSettings};
use crate::domain::sorting::sort_visits;
use crate::domain::title::ParsedTitle;
use crate::domain::visit::{VisitRecord, VisitsResponse};

const PLAINTEXT_RULE: &str = "------------------------------";

/// Running count and value of the visits that made it into the list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub count: usize,
    pub total: f64,
}

impl Totals {
    pub fn add(&mut self, visit: &VisitRecord) {
        self.count += 1;
        self.total += visit.value();
    }
}

/// Turns a visits response into a QuickList itinerary.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    cfg: FormatterConfig,
}

/// Rendered body lines plus the totals they add up to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    pub lines: Vec<String>,
    pub totals: Totals,
}

impl Formatter {
    pub fn new(cfg: FormatterConfig) -> Self {
        Self { cfg }
    }

    /// Full pipeline: sort, filter, render, then prepend the range header.
    pub fn format_visits(
        &self,
        data: &VisitsResponse,
        settings: &FilterSettings,
        range_start: Option<DateTime<FixedOffset>>,
        range_end: Option<DateTime<FixedOffset>>,
        dialect: Dialect,
        filter_text: &str,
    ) -> String {
        let itinerary = self.build(data, settings, dialect, filter_text);

        let mut output = String::new();
        if let Some(header) = self.header(&itinerary.totals, settings, range_start, range_end, dialect) {
            output.push_str(&header);
        }
        for line in &itinerary.lines {
            output.push_str(line);
            output.push_str("\n\n");
        }
        output
    }

    /// Sorted, filtered and rendered lines without the header.
    pub fn build(
        &self,
        data: &VisitsResponse,
        settings: &FilterSettings,
        dialect: Dialect,
        filter_text: &str,
    ) -> Itinerary {
        let visits: Vec<VisitRecord> = data.visits().cloned().collect();
        let mut itinerary = Itinerary::default();

        for record in sort_visits(&visits, settings.sort_by) {
            let visit = self.normalize(record);
            if !include(&visit, settings, filter_text) {
                continue;
            }
            itinerary.totals.add(record);
            itinerary.lines.push(render_line(&visit, settings, dialect));
        }

        tracing::debug!(
            listed = itinerary.totals.count,
            total = itinerary.totals.total,
            "built itinerary"
        );
        itinerary
    }

    pub fn normalize<'a>(&self, record: &'a VisitRecord) -> NormalizedVisit<'a> {
        let title = match ParsedTitle::parse_lenient(&record.title) {
            Ok(title) => title,
            Err((fallback, err)) => {
                tracing::warn!(visit_id = %record.id, error = %err, "listing visit with fallback title tokens");
                fallback
            }
        };
        let display = DisplayFields::new(record, &title, &self.cfg);
        NormalizedVisit { record, title, display }
    }

    /// Only produced when range info is on and both ends of the range are known.
    pub fn header(
        &self,
        totals: &Totals,
        settings: &FilterSettings,
        range_start: Option<DateTime<FixedOffset>>,
        range_end: Option<DateTime<FixedOffset>>,
        dialect: Dialect,
    ) -> Option<String> {
        if !settings.show_range_info {
            return None;
        }
        let (start, end) = (range_start?, range_end?);
        let start = format_short_date(&start, self.cfg.timezone);
        let end = format_short_date(&end, self.cfg.timezone);
        let jobs = format!("{} Jobs", totals.count);
        let money = format_money(totals.total);

        let header = match (dialect, settings.show_value) {
            (Dialect::Markdown, true) => {
                format!("# **{start} &ndash; {end}** **`{jobs}`** **`${money}`**\n\n")
            }
            (Dialect::Markdown, false) => format!("# **{start} &ndash; {end}** **`{jobs}`**\n\n"),
            (Dialect::Plaintext, true) => {
                format!("{start} - {end}, {jobs}, ${money}\n\n{PLAINTEXT_RULE}\n\n")
            }
            (Dialect::Plaintext, false) => format!("{start} - {end}, {jobs}\n\n{PLAINTEXT_RULE}\n\n"),
        };
        Some(header)
    }
}

/// One listed visit, without the trailing blank line.
pub fn render_line(visit: &NormalizedVisit<'_>, settings: &FilterSettings, dialect: Dialect) -> String {
    let t = &visit.title;
    let d = &visit.display;
    let show_date = settings.show_dates && settings.date_display_type.shows(d.weekday);
    let show_time = settings.show_time && !d.time.is_empty();
    let value = display_value(visit.record.job.total);

    let mut line = String::new();
    match dialect {
        Dialect::Markdown => {
            if show_date {
                line.push_str(&format!(" **`{}`** ", d.date));
            }
            line.push_str(&format!(
                "[**{}**]({}) {} [{}]({}) - {}",
                t.job_identifier,
                d.visit_url,
                t.geo_code_or("?"),
                t.address_or("?"),
                d.map_url,
                t.work_code_or("?"),
            ));
            if show_time {
                line.push_str(&format!(" **`{}`**", d.time));
            }
            if settings.show_value {
                line.push_str(&format!(" `${value}`"));
            }
            if settings.show_salesperson {
                line.push_str(&format!(" `{}`", d.salesperson));
            }
        }
        Dialect::Plaintext => {
            line.push_str(&format!(
                "{} {} {} - {}",
                t.job_identifier,
                t.geo_code_or("?"),
                t.address_or("?"),
                t.work_code_or("?"),
            ));
            if show_date {
                line.push_str(&format!(" {}", d.date));
            }
            if show_time {
                line.push_str(&format!(" {}", d.time));
            }
            if settings.show_value {
                line.push_str(&format!(" - ${value}"));
            }
            if settings.show_salesperson {
                line.push_str(&format!(" - {}", d.salesperson));
            }
        }
    }
    line
}

/// Per-visit value: "?" when the job has no (or a zero) total.
fn display_value(total: Option<f64>) -> String {
    match total {
        Some(v) if v != 0.0 => format_money(v),
        _ => "?".to_string(),
    }
}

/// Shortest form: 1200 rather than 1200.0, 99.5 stays 99.5.
pub fn format_money(amount: f64) -> String {
    format!("{amount}")
}
