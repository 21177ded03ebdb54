//! Response DTOs for calendar and pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::calendar::models::{DateRange, DisabledMatcher, NightKind};
use crate::calendar::month::DayView;
use crate::calendar::selection::SelectionRejection;
use crate::pricing::calculators::{NightLine, StayQuote};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheStats,
}

/// Selectability and price of one day
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub selectable: bool,
    pub price: MoneyResponse,
    pub night_kind: NightKind,
}

/// One day of a month view
#[derive(Debug, Clone, Serialize)]
pub struct MonthDayResponse {
    pub date: NaiveDate,
    pub selectable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<MoneyResponse>,
    pub night_kind: NightKind,
}

impl MonthDayResponse {
    pub fn from_view(view: &DayView, currency: &str) -> Self {
        Self {
            date: view.date,
            selectable: view.selectable,
            price: view.price.map(|amount| MoneyResponse::new(amount, currency)),
            night_kind: view.night_kind,
        }
    }
}

/// Render hints for a whole month
#[derive(Debug, Serialize)]
pub struct MonthResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<MonthDayResponse>,
}

/// Dates a calendar widget must disable
#[derive(Debug, Serialize)]
pub struct DisabledResponse {
    pub today: NaiveDate,
    pub horizon: NaiveDate,
    pub matchers: Vec<DisabledMatcher>,
}

/// Outcome of a day click
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub accepted: bool,
    /// New selection when accepted, the unchanged prior one otherwise
    pub range: DateRange,
    pub nights: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<MoneyResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SelectionRejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One priced night in a quote
#[derive(Debug, Serialize)]
pub struct NightLineResponse {
    pub date: NaiveDate,
    pub night_kind: NightKind,
    pub price: MoneyResponse,
}

impl NightLineResponse {
    fn from_line(line: &NightLine, currency: &str) -> Self {
        Self {
            date: line.date,
            night_kind: line.kind,
            price: MoneyResponse::new(line.price, currency),
        }
    }
}

/// Response for a stay quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub nights: i64,
    pub total: MoneyResponse,
    pub lines: Vec<NightLineResponse>,
}

impl From<StayQuote> for QuoteResponse {
    fn from(quote: StayQuote) -> Self {
        let lines = quote
            .lines
            .iter()
            .map(|line| NightLineResponse::from_line(line, &quote.currency))
            .collect();

        Self {
            from: quote.from,
            to: quote.to,
            nights: quote.nights,
            total: MoneyResponse::new(quote.total, &quote.currency),
            lines,
        }
    }
}

/// Inclusive list of dates in a range
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub dates: Vec<NaiveDate>,
    pub count: usize,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
}
