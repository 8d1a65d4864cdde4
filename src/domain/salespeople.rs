// src/domain/salespeople.rs

use std::collections::BTreeSet;

use crate::domain::visit::VisitsResponse;

/// Distinct, trimmed salesperson first names over every visit (filters are
/// not applied), sorted. Feeds the salesperson filter options.
pub fn extract_salespeople(data: &VisitsResponse) -> Vec<String> {
    data.visits()
        .filter_map(|v| v.salesperson_first())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
