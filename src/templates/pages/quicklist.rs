use crate::domain::settings::{weekday_name, WEEKDAYS};
use crate::domain::{Dialect, FilterSettings};
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub struct QuickListVm<'a> {
    pub settings: &'a FilterSettings,
    pub dialect: Dialect,
    pub filter_text: &'a str,
    /// `YYYY-MM-DD` values for the date inputs.
    pub start: &'a str,
    pub end: &'a str,
    pub salespeople: &'a [String],
    pub output: &'a str,
    pub error: Option<&'a str>,
}

pub fn quicklist_page(vm: &QuickListVm<'_>) -> Markup {
    desktop_layout(
        "QuickList",
        true,
        html! {
            main class="container" {
                h1 { "QuickList" }
                form method="get" action="/" {
                    input type="hidden" name="submitted" value="1";
                    (card("Range", range_fields(vm)))
                    (card("Display", display_fields(vm)))
                    (card("Filters", filter_fields(vm)))
                    button type="submit" class="primary" { "Update" }
                }

                @if let Some(err) = vm.error {
                    p class="error" { (err) }
                }
                pre id="quicklist-output" { (vm.output) }
            }
        },
    )
}

fn range_fields(vm: &QuickListVm<'_>) -> Markup {
    html! {
        fieldset {
            label { "From " input type="date" name="start" value=(vm.start); }
            " "
            label { "To " input type="date" name="end" value=(vm.end); }
            " "
            label {
                "Format "
                select name="format" {
                    (option("markdown", "Markdown", vm.dialect == Dialect::Markdown))
                    (option("plaintext", "Plain text", vm.dialect == Dialect::Plaintext))
                }
            }
        }
    }
}

fn display_fields(vm: &QuickListVm<'_>) -> Markup {
    let s = vm.settings;
    html! {
        fieldset {
            label {
                "Sort by "
                select name="sortBy" {
                    @for (value, label) in [
                        ("date", "Date"),
                        ("alphabetical", "Alphabetical"),
                        ("value", "Value"),
                        ("geoCode", "Geo code"),
                        ("geoCodeThenValue", "Geo code, then value"),
                        ("salesperson", "Salesperson"),
                    ] {
                        (option(value, label, serde_name(&s.sort_by) == value))
                    }
                }
            }
        }
        fieldset {
            (checkbox("showDates", "Dates", s.show_dates))
            (checkbox("showTime", "Times", s.show_time))
            (checkbox("showValue", "Value", s.show_value))
            (checkbox("showSalesperson", "Salesperson", s.show_salesperson))
            (checkbox("showRangeInfo", "Range header", s.show_range_info))
        }
        fieldset {
            label {
                "Days shown "
                select name="dateDisplayType" {
                    @for (value, label) in [("all", "All"), ("weekdayOnly", "Weekdays"), ("weekendOnly", "Weekends")] {
                        (option(value, label, serde_name(&s.date_display_type) == value))
                    }
                }
            }
        }
    }
}

fn filter_fields(vm: &QuickListVm<'_>) -> Markup {
    let s = vm.settings;
    html! {
        fieldset {
            label {
                "Annual jobs "
                select name="annual" {
                    @for (value, label) in [
                        ("include", "Include"),
                        ("exclude", "Exclude"),
                        ("excludeUnconfirmed", "Exclude unconfirmed"),
                        ("annualOnly", "Annual only"),
                        ("annualOnlyConfirmed", "Confirmed annual only"),
                        ("annualOnlyUnconfirmed", "Unconfirmed annual only"),
                    ] {
                        (option(value, label, serde_name(&s.annual) == value))
                    }
                }
            }
        }
        fieldset {
            label {
                "Salespeople "
                select name="salespersonFilter" {
                    (option("all", "All", serde_name(&s.salesperson_filter) == "all"))
                    (option("showSelected", "Only checked", serde_name(&s.salesperson_filter) == "showSelected"))
                }
            }
            @for name in vm.salespeople {
                (checkbox_value("selectedSalespeople", name, s.selected_salespeople.contains(name)))
            }
        }
        fieldset {
            label {
                "Days "
                select name="dayFilter" {
                    (option("all", "All", serde_name(&s.day_filter) == "all"))
                    (option("showSelected", "Only checked", serde_name(&s.day_filter) == "showSelected"))
                }
            }
            @for day in WEEKDAYS {
                @let name = weekday_name(day);
                (checkbox_value("selectedDays", name, s.selected_days.iter().any(|d| d == name)))
            }
        }
        fieldset {
            label { "Search " input type="search" name="filterText" value=(vm.filter_text); }
        }
    }
}

fn option(value: &str, label: &str, selected: bool) -> Markup {
    html! {
        option value=(value) selected[selected] { (label) }
    }
}

fn checkbox(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        label { input type="checkbox" name=(name) checked[checked]; " " (label) " " }
    }
}

fn checkbox_value(name: &str, value: &str, checked: bool) -> Markup {
    html! {
        label { input type="checkbox" name=(name) value=(value) checked[checked]; " " (value) " " }
    }
}

/// Wire name of a settings enum, matching what the form submits.
fn serde_name<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
