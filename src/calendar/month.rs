//! Per-day render hints for a whole month.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::CalendarError;

use super::availability::Availability;
use super::models::NightKind;

/// What a calendar widget shows for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub selectable: bool,
    /// Only shown for selectable days
    pub price: Option<Decimal>,
    pub night_kind: NightKind,
}

/// Render hints for every day of `year`-`month` as of `today`
pub fn month_view(
    availability: &Availability,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Vec<DayView>, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|date| {
            let selectable = availability.is_day_selectable_on(date, today);
            DayView {
                date,
                selectable,
                price: selectable.then(|| availability.rules().price_for(date)),
                night_kind: NightKind::of(date),
            }
        })
        .collect();

    Ok(days)
}
