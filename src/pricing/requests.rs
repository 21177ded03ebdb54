//! Request DTOs for calendar and pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

/// A day click, carrying the session's current selection
#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    pub clicked: NaiveDate,
}

/// Query for a stay quote
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Query for the inclusive list of dates in a range
#[derive(Debug, Deserialize)]
pub struct DatesQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}
