// src/domain/settings.rs

use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Date,
    Alphabetical,
    Value,
    GeoCode,
    GeoCodeThenValue,
    Salesperson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnualFilter {
    #[default]
    Include,
    Exclude,
    ExcludeUnconfirmed,
    AnnualOnly,
    AnnualOnlyConfirmed,
    AnnualOnlyUnconfirmed,
}

/// Shared shape of the salesperson and day filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionFilter {
    #[default]
    All,
    ShowSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateDisplay {
    #[default]
    All,
    WeekdayOnly,
    WeekendOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Markdown,
    Plaintext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSettings {
    pub sort_by: SortBy,
    pub annual: AnnualFilter,
    pub show_dates: bool,
    pub date_display_type: DateDisplay,
    pub show_time: bool,
    pub show_value: bool,
    pub show_salesperson: bool,
    pub show_range_info: bool,
    pub salesperson_filter: SelectionFilter,
    pub selected_salespeople: Vec<String>,
    pub day_filter: SelectionFilter,
    /// Full English weekday names, e.g. "Monday".
    pub selected_days: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Date,
            annual: AnnualFilter::Include,
            show_dates: false,
            date_display_type: DateDisplay::All,
            show_time: false,
            show_value: false,
            show_salesperson: true,
            show_range_info: true,
            salesperson_filter: SelectionFilter::All,
            selected_salespeople: Vec::new(),
            day_filter: SelectionFilter::All,
            selected_days: Vec::new(),
        }
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

impl DateDisplay {
    pub fn shows(self, day: Weekday) -> bool {
        match self {
            DateDisplay::All => true,
            DateDisplay::WeekdayOnly => !is_weekend(day),
            DateDisplay::WeekendOnly => is_weekend(day),
        }
    }
}
