//! Calendar value types shared by the rules store, the availability
//! evaluator and the pricing calculators.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A checkin/checkout selection.
///
/// Either end may be absent while a selection is in progress. A resolved
/// range always has `from <= to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Empty selection
    pub fn empty() -> Self {
        Self::default()
    }

    /// Selection with only a checkin day
    pub fn pending(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Fully resolved range
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn is_pending(&self) -> bool {
        self.from.is_some() && self.to.is_none()
    }

    /// Both ends, when the range is resolved
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// Price class of a night, by the date the night starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightKind {
    Weekday,
    Weekend,
}

impl NightKind {
    /// Friday and Saturday nights are weekend nights
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Fri | Weekday::Sat => NightKind::Weekend,
            _ => NightKind::Weekday,
        }
    }
}

/// A rule marking dates a calendar widget must render as disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisabledMatcher {
    /// Every date strictly before `date`
    Before { date: NaiveDate },
    /// Every date strictly after `date`
    After { date: NaiveDate },
    /// Every date in `from..=to`
    Range { from: NaiveDate, to: NaiveDate },
}

impl DisabledMatcher {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DisabledMatcher::Before { date: edge } => date < edge,
            DisabledMatcher::After { date: edge } => date > edge,
            DisabledMatcher::Range { from, to } => from <= date && date <= to,
        }
    }
}
