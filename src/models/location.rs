use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Last-known location snapshot returned by `GET /locations/latest`.
///
/// Read-only; the client never posts locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub accuracy: f64,
    pub id: String,
}
