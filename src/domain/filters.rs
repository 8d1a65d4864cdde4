// src/domain/filters.rs

use crate::domain::display::DisplayFields;
use crate::domain::settings::{weekday_name, AnnualFilter, FilterSettings, SelectionFilter};
use crate::domain::title::{AnnualStatus, ParsedTitle};
use crate::domain::visit::VisitRecord;

/// A visit with everything the filters and renderer need.
#[derive(Debug, Clone)]
pub struct NormalizedVisit<'a> {
    pub record: &'a VisitRecord,
    pub title: ParsedTitle,
    pub display: DisplayFields,
}

/// The independent include/exclude checks. A visit is listed only if every
/// predicate passes, so the order they run in never changes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Annual,
    Salesperson,
    Weekday,
    FreeText,
}

impl Predicate {
    pub const ALL: [Predicate; 4] = [
        Predicate::Annual,
        Predicate::Salesperson,
        Predicate::Weekday,
        Predicate::FreeText,
    ];

    pub fn passes(self, visit: &NormalizedVisit<'_>, settings: &FilterSettings, filter_text: &str) -> bool {
        match self {
            Predicate::Annual => annual_passes(settings.annual, visit.title.annual_status()),
            Predicate::Salesperson => selection_passes(
                settings.salesperson_filter,
                &settings.selected_salespeople,
                &visit.display.salesperson,
            ),
            Predicate::Weekday => selection_passes(
                settings.day_filter,
                &settings.selected_days,
                weekday_name(visit.display.weekday),
            ),
            Predicate::FreeText => text_passes(&visit.record.title, filter_text),
        }
    }
}

pub fn include(visit: &NormalizedVisit<'_>, settings: &FilterSettings, filter_text: &str) -> bool {
    Predicate::ALL
        .iter()
        .all(|p| p.passes(visit, settings, filter_text))
}

pub fn annual_passes(filter: AnnualFilter, status: AnnualStatus) -> bool {
    use AnnualStatus::*;

    match filter {
        AnnualFilter::Include => true,
        AnnualFilter::Exclude => status == NotAnnual,
        AnnualFilter::ExcludeUnconfirmed => status != Unconfirmed,
        AnnualFilter::AnnualOnly => status != NotAnnual,
        AnnualFilter::AnnualOnlyConfirmed => status == Confirmed,
        AnnualFilter::AnnualOnlyUnconfirmed => status == Unconfirmed,
    }
}

/// An empty selection under `ShowSelected` lets nothing through.
fn selection_passes(filter: SelectionFilter, selected: &[String], value: &str) -> bool {
    match filter {
        SelectionFilter::All => true,
        SelectionFilter::ShowSelected => selected.iter().any(|s| s == value),
    }
}

fn text_passes(title: &str, filter_text: &str) -> bool {
    filter_text.is_empty() || title.to_lowercase().contains(&filter_text.to_lowercase())
}
