// src/query.rs
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::domain::{Dialect, FilterSettings};
use crate::errors::ServerError;

/// Decoded `key=value` pairs, repeats kept in order.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub fn query_param(raw: Option<&str>, name: &str) -> Option<String> {
    query_pairs(raw)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}

/// The QuickList page's settings form, submitted with GET.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub settings: FilterSettings,
    pub dialect: Dialect,
    pub filter_text: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PageQuery {
    /// Unchecked boxes are absent from a submitted form, so booleans only fall
    /// back to their defaults until the form carries `submitted`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ServerError> {
        let pairs = query_pairs(raw);
        let get = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .filter(|v| !v.is_empty())
        };
        let all = |name: &str| -> Vec<String> {
            pairs
                .iter()
                .filter(|(k, v)| k == name && !v.is_empty())
                .map(|(_, v)| v.clone())
                .collect()
        };

        let submitted = get("submitted").is_some();
        let defaults = FilterSettings::default();
        let flag = |name: &str, default: bool| {
            if submitted {
                get(name).is_some()
            } else {
                default
            }
        };

        let settings = FilterSettings {
            sort_by: choice("sortBy", get("sortBy"))?.unwrap_or(defaults.sort_by),
            annual: choice("annual", get("annual"))?.unwrap_or(defaults.annual),
            show_dates: flag("showDates", defaults.show_dates),
            date_display_type: choice("dateDisplayType", get("dateDisplayType"))?
                .unwrap_or(defaults.date_display_type),
            show_time: flag("showTime", defaults.show_time),
            show_value: flag("showValue", defaults.show_value),
            show_salesperson: flag("showSalesperson", defaults.show_salesperson),
            show_range_info: flag("showRangeInfo", defaults.show_range_info),
            salesperson_filter: choice("salespersonFilter", get("salespersonFilter"))?
                .unwrap_or(defaults.salesperson_filter),
            selected_salespeople: all("selectedSalespeople"),
            day_filter: choice("dayFilter", get("dayFilter"))?.unwrap_or(defaults.day_filter),
            selected_days: all("selectedDays"),
        };

        Ok(Self {
            settings,
            dialect: choice("format", get("format"))?.unwrap_or_default(),
            filter_text: get("filterText").unwrap_or_default().to_string(),
            start: get("start").map(str::to_string),
            end: get("end").map(str::to_string),
        })
    }
}

/// Enum values share their serde names with the JSON API.
fn choice<T: DeserializeOwned>(name: &str, raw: Option<&str>) -> Result<Option<T>, ServerError> {
    raw.map(|v| {
        serde_json::from_value(Value::String(v.to_string()))
            .map_err(|_| ServerError::BadRequest(format!("invalid {name}: {v}")))
    })
    .transpose()
}
