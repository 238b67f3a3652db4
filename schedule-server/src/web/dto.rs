//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DaySubset, InvalidDaySubset};

/// Query parameters for `POST /schedule/aggregate`.
#[derive(Debug, Default, Deserialize)]
pub struct AggregateQuery {
    /// `weekday`, `weekend`, `all`, or a comma-separated list of days.
    /// Defaults to the whole week.
    pub days: Option<String>,
}

impl AggregateQuery {
    /// The requested day subset.
    pub fn subset(&self) -> Result<DaySubset, InvalidDaySubset> {
        match &self.days {
            Some(days) => days.parse(),
            None => Ok(DaySubset::all()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
