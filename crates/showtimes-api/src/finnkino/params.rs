//! Finnkino API request parameter types.

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Request parameters for the `Schedule` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleParams {
    /// Theater area ID (`area` parameter).
    pub area: String,
    /// Schedule date (`dt` parameter). `None` = today.
    pub date: Option<NaiveDate>,
}

impl ScheduleParams {
    /// Creates parameters for one area with the default date.
    #[must_use]
    pub fn new(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            date: None,
        }
    }

    /// Sets the schedule date.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Builds the query string pairs.
    ///
    /// The date is sent in the `dd.mm.yyyy` form the endpoint expects.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("area", self.area.clone())];
        if let Some(date) = self.date {
            query.push(("dt", date.format("%d.%m.%Y").to_string()));
        }
        query
    }
}

/// Parses a `--date` argument (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_schedule_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date format: {s}"))
}
