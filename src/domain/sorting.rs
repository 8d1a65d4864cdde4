// src/domain/sorting.rs

use std::cmp::Ordering;

use crate::domain::settings::SortBy;
use crate::domain::title::tokenize;
use crate::domain::visit::VisitRecord;

/// Sort a copy of the visit list; the caller's slice is left untouched.
/// `sort_by` is stable, so equal keys keep their input order.
pub fn sort_visits(visits: &[VisitRecord], sort_by: SortBy) -> Vec<&VisitRecord> {
    let mut sorted: Vec<&VisitRecord> = visits.iter().collect();

    match sort_by {
        SortBy::Date => sorted.sort_by_key(|v| v.start_at),
        SortBy::Alphabetical => sorted.sort_by(|a, b| text_cmp(&a.title, &b.title)),
        SortBy::Value => sorted.sort_by(|a, b| value_desc(a, b)),
        SortBy::GeoCode => sort_by_geo_code(&mut sorted, |_, _| Ordering::Equal),
        SortBy::GeoCodeThenValue => sort_by_geo_code(&mut sorted, value_desc),
        SortBy::Salesperson => sorted.sort_by(|a, b| {
            text_cmp(
                a.salesperson_first().unwrap_or(""),
                b.salesperson_first().unwrap_or(""),
            )
        }),
    }

    sorted
}

/// Geo-code slot of the title, empty when there is none.
pub fn geo_code(visit: &VisitRecord) -> String {
    tokenize(&visit.title)
        .ok()
        .and_then(|t| t.geo_code)
        .unwrap_or_default()
}

/// Geo codes are computed once per visit rather than on every comparison.
fn sort_by_geo_code<'a, F>(visits: &mut Vec<&'a VisitRecord>, then: F)
where
    F: Fn(&VisitRecord, &VisitRecord) -> Ordering,
{
    let mut keyed: Vec<(String, &'a VisitRecord)> =
        visits.iter().map(|v| (geo_code(v), *v)).collect();
    keyed.sort_by(|(ga, a), (gb, b)| text_cmp(ga, gb).then_with(|| then(*a, *b)));
    *visits = keyed.into_iter().map(|(_, v)| v).collect();
}

fn value_desc(a: &VisitRecord, b: &VisitRecord) -> Ordering {
    b.value().total_cmp(&a.value())
}

/// Case-insensitive first, raw text as the tie-breaker.
fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
