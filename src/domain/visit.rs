// src/domain/visit.rs

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

// response
//  └── data
//       └── visits
//            └── edges[]
//                 └── node
//                      ├── id            (base64 "gid://Jobber/Visit/<n>")
//                      ├── title
//                      ├── startAt / endAt
//                      └── job
//                           ├── jobberWebUri
//                           ├── total
//                           └── salesperson
//                                └── name { first, last }

/// The GraphQL response envelope. Every level may be missing; a missing level
/// simply means there are no visits to list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitsResponse {
    pub data: Option<VisitsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitsData {
    pub visits: Option<VisitConnection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitConnection {
    #[serde(default)]
    pub edges: Vec<VisitEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitEdge {
    pub node: VisitRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: String,
    pub title: String,
    pub start_at: DateTime<FixedOffset>,
    pub end_at: DateTime<FixedOffset>,
    pub job: Job,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub jobber_web_uri: String,
    pub total: Option<f64>,
    pub salesperson: Option<Salesperson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Salesperson {
    pub name: PersonName,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonName {
    pub first: Option<String>,
}

impl VisitsResponse {
    /// Visits in upstream order, unwrapped from their edge envelopes.
    pub fn visits(&self) -> impl Iterator<Item = &VisitRecord> {
        self.data
            .iter()
            .filter_map(|d| d.visits.as_ref())
            .flat_map(|v| v.edges.iter())
            .map(|edge| &edge.node)
    }
}

impl VisitRecord {
    /// Job value, with a missing total counted as zero.
    pub fn value(&self) -> f64 {
        self.job.total.unwrap_or(0.0)
    }

    /// Raw (untrimmed) salesperson first name, if any.
    pub fn salesperson_first(&self) -> Option<&str> {
        self.job
            .salesperson
            .as_ref()
            .and_then(|s| s.name.first.as_deref())
    }
}
