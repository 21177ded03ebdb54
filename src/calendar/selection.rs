//! Click-driven selection for one calendar session.
//!
//! Wraps [`add_day_to_range`] with the validation a range must pass before
//! it is shown as bookable: the checkin day, the checkout day and every day
//! in between must be selectable. A rejected click leaves the previous
//! selection untouched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CalendarError;
use crate::pricing::calculators::{quote_stay, SameDayStay};

use super::availability::{add_day_to_range, get_dates_between_dates, Availability};
use super::models::DateRange;

/// Why a click was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRejection {
    StartNotSelectable,
    EndNotSelectable,
    DaysBetweenNotSelectable,
    SameDayNotAllowed,
}

impl SelectionRejection {
    /// Message suitable for showing to the guest
    pub fn message(&self) -> &'static str {
        match self {
            SelectionRejection::StartNotSelectable => "This date cannot be selected",
            SelectionRejection::EndNotSelectable => "The end date cannot be selected",
            SelectionRejection::DaysBetweenNotSelectable => {
                "Some days between those 2 dates cannot be selected"
            }
            SelectionRejection::SameDayNotAllowed => "A stay must last at least one night",
        }
    }
}

/// Accepted selection with its price summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Selection as stored; `to` stays absent after a single click
    pub range: DateRange,
    pub nights: i64,
    pub total: Decimal,
}

/// Selection state of a single session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    range: DateRange,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously confirmed range
    pub fn from_range(range: DateRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn reset(&mut self) {
        self.range = DateRange::empty();
    }

    /// Apply a click; on rejection the stored selection is unchanged
    pub fn click(
        &mut self,
        clicked: NaiveDate,
        availability: &Availability,
        policy: SameDayStay,
    ) -> Result<SelectionSummary, SelectionRejection> {
        let proposed = add_day_to_range(clicked, self.range);
        let summary = evaluate_range(proposed, availability, policy).map_err(|rejection| {
            warn!(
                "Rejected click on {} (selection {:?}): {}",
                clicked,
                self.range,
                rejection.message()
            );
            rejection
        })?;

        debug!(
            "Selection now {:?}: {} nights, total {}",
            summary.range, summary.nights, summary.total
        );
        self.range = summary.range;
        Ok(summary)
    }
}

/// Validate a proposed selection and price it.
///
/// A pending range is validated as the single day `from..=from`. It is
/// priced as one night under [`SameDayStay::OneNight`] and left unpriced
/// under [`SameDayStay::Reject`].
pub fn evaluate_range(
    proposed: DateRange,
    availability: &Availability,
    policy: SameDayStay,
) -> Result<SelectionSummary, SelectionRejection> {
    let from = proposed
        .from
        .ok_or(SelectionRejection::StartNotSelectable)?;
    let today = availability.today();

    let to = match proposed.to {
        None => {
            if !availability.is_day_selectable_on(from, today) {
                return Err(SelectionRejection::StartNotSelectable);
            }
            from
        }
        Some(to) => {
            if !availability.is_day_selectable_on(to, today) {
                return Err(SelectionRejection::EndNotSelectable);
            }
            to
        }
    };

    let days = get_dates_between_dates(Some(from), Some(to))
        .map_err(|_| SelectionRejection::EndNotSelectable)?;
    if days
        .iter()
        .any(|day| !availability.is_day_selectable_on(*day, today))
    {
        return Err(SelectionRejection::DaysBetweenNotSelectable);
    }

    if proposed.is_pending() && policy == SameDayStay::Reject {
        return Ok(SelectionSummary {
            range: proposed,
            nights: 0,
            total: Decimal::ZERO,
        });
    }

    let quote = quote_stay(availability.rules(), from, to, policy).map_err(|e| match e {
        CalendarError::SameDayStay { .. } => SelectionRejection::SameDayNotAllowed,
        _ => SelectionRejection::EndNotSelectable,
    })?;

    Ok(SelectionSummary {
        range: proposed,
        nights: quote.nights,
        total: quote.total,
    })
}
