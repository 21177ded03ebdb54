//! Availability evaluator.
//!
//! Decides which days can be selected and turns single clicks into
//! checkin/checkout ranges. Range construction performs no selectability
//! checks; see [`crate::calendar::selection`] for the validation policy.

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::error::CalendarError;

use super::clock::Clock;
use super::models::{DateRange, DisabledMatcher};
use super::rules::CalendarRules;

/// Days ahead of today that can still be selected
pub const DEFAULT_HORIZON_DAYS: u32 = 360;

/// Per-day selectability over a shared rules store
#[derive(Clone)]
pub struct Availability {
    rules: Arc<CalendarRules>,
    clock: Arc<dyn Clock>,
    horizon_days: u32,
}

impl Availability {
    pub fn new(rules: Arc<CalendarRules>, clock: Arc<dyn Clock>, horizon_days: u32) -> Self {
        Self {
            rules,
            clock,
            horizon_days,
        }
    }

    pub fn rules(&self) -> &CalendarRules {
        &self.rules
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Current local date, read from the clock on every call
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Last selectable date as of `today`
    pub fn horizon_from(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn horizon(&self) -> NaiveDate {
        self.horizon_from(self.today())
    }

    /// Whether `date` can be part of a stay.
    ///
    /// False for past dates, dates beyond the horizon, and blocked or
    /// booked dates.
    pub fn is_day_selectable(&self, date: NaiveDate) -> bool {
        self.is_day_selectable_on(date, self.today())
    }

    /// Same as [`Self::is_day_selectable`] against an explicit `today`
    pub fn is_day_selectable_on(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today || date > self.horizon_from(today) {
            return false;
        }
        !(self.rules.is_blocked(date) || self.rules.is_booked(date))
    }

    /// Matchers for every date a calendar widget must disable
    pub fn disabled_matchers(&self) -> Vec<DisabledMatcher> {
        let today = self.today();

        let mut matchers: Vec<DisabledMatcher> = self
            .rules
            .blocked_ranges()
            .into_iter()
            .chain(self.rules.booked_ranges())
            .filter_map(|range| range.bounds())
            .map(|(from, to)| DisabledMatcher::Range { from, to })
            .collect();

        matchers.push(DisabledMatcher::Before { date: today });
        matchers.push(DisabledMatcher::After {
            date: self.horizon_from(today),
        });

        matchers
    }
}

/// Resolve the selection after `clicked` is clicked.
///
/// A click after a pending checkin completes the range; any other click
/// starts a new pending selection at `clicked`.
pub fn add_day_to_range(clicked: NaiveDate, current: DateRange) -> DateRange {
    match (current.from, current.to) {
        (Some(from), None) if clicked > from => DateRange::between(from, clicked),
        _ => DateRange::pending(clicked),
    }
}

/// Every date from `from` to `to`, both included, in ascending order.
///
/// Empty when either end is absent.
pub fn get_dates_between_dates(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<NaiveDate>, CalendarError> {
    let (from, to) = match (from, to) {
        (Some(from), Some(to)) => (from, to),
        _ => return Ok(Vec::new()),
    };

    if to < from {
        return Err(CalendarError::InvalidRange { from, to });
    }

    Ok(from.iter_days().take_while(|day| *day <= to).collect())
}

/// Nights between checkin and checkout; the checkout day is not a night
pub fn calc_number_of_nights_between_dates(
    from: NaiveDate,
    to: NaiveDate,
) -> Result<i64, CalendarError> {
    if to < from {
        return Err(CalendarError::InvalidRange { from, to });
    }
    Ok(to.signed_duration_since(from).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::clock::FixedClock;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn availability_on(today: NaiveDate) -> Availability {
        Availability::new(
            Arc::new(CalendarRules::sample().unwrap()),
            Arc::new(FixedClock(today)),
            DEFAULT_HORIZON_DAYS,
        )
    }

    // ==================== is_day_selectable tests ====================

    #[test]
    fn test_past_days_not_selectable() {
        let availability = availability_on(ymd(2023, 3, 1));
        assert!(!availability.is_day_selectable(ymd(2023, 2, 28)));
        assert!(!availability.is_day_selectable(ymd(2022, 3, 1)));
        assert!(availability.is_day_selectable(ymd(2023, 3, 1))); // today
    }

    #[test]
    fn test_horizon_is_inclusive() {
        let availability = availability_on(ymd(2023, 1, 1));
        let horizon = ymd(2023, 1, 1) + chrono::Duration::days(360);
        assert_eq!(availability.horizon(), horizon);
        assert!(availability.is_day_selectable(horizon));
        assert!(!availability.is_day_selectable(horizon.succ_opt().unwrap()));
    }

    #[test]
    fn test_blocked_and_booked_days_not_selectable() {
        let availability = availability_on(ymd(2023, 1, 1));
        assert!(!availability.is_day_selectable(ymd(2023, 3, 20)));
        assert!(!availability.is_day_selectable(ymd(2023, 3, 22)));
        assert!(!availability.is_day_selectable(ymd(2023, 6, 17)));
        assert!(availability.is_day_selectable(ymd(2023, 3, 19)));
        assert!(availability.is_day_selectable(ymd(2023, 3, 23)));
    }

    #[test]
    fn test_selectable_is_idempotent() {
        let availability = availability_on(ymd(2023, 1, 1));
        let day = ymd(2023, 4, 5);
        assert_eq!(
            availability.is_day_selectable(day),
            availability.is_day_selectable(day)
        );
    }

    #[test]
    fn test_zero_horizon_allows_only_today() {
        let availability = Availability::new(
            Arc::new(CalendarRules::sample().unwrap()),
            Arc::new(FixedClock(ymd(2023, 5, 1))),
            0,
        );
        assert!(availability.is_day_selectable(ymd(2023, 5, 1)));
        assert!(!availability.is_day_selectable(ymd(2023, 5, 2)));
    }

    #[test]
    fn test_disabled_matchers_cover_unselectable_days() {
        let availability = availability_on(ymd(2023, 1, 1));
        let matchers = availability.disabled_matchers();

        assert!(matchers.contains(&DisabledMatcher::Before { date: ymd(2023, 1, 1) }));
        assert!(matchers.contains(&DisabledMatcher::Range {
            from: ymd(2023, 3, 20),
            to: ymd(2023, 3, 22),
        }));

        for day in ymd(2022, 12, 1).iter_days().take(500) {
            let disabled = matchers.iter().any(|m| m.matches(day));
            assert_eq!(disabled, !availability.is_day_selectable(day), "{}", day);
        }
    }

    // ==================== add_day_to_range tests ====================

    #[test]
    fn test_first_click_starts_pending_range() {
        let range = add_day_to_range(ymd(2023, 4, 10), DateRange::empty());
        assert_eq!(range, DateRange::pending(ymd(2023, 4, 10)));
    }

    #[test]
    fn test_later_click_completes_range() {
        let range = add_day_to_range(ymd(2023, 4, 15), DateRange::pending(ymd(2023, 4, 10)));
        assert_eq!(range, DateRange::between(ymd(2023, 4, 10), ymd(2023, 4, 15)));
    }

    #[test]
    fn test_earlier_click_restarts_range() {
        let range = add_day_to_range(ymd(2023, 4, 5), DateRange::pending(ymd(2023, 4, 10)));
        assert_eq!(range, DateRange::pending(ymd(2023, 4, 5)));
    }

    #[test]
    fn test_same_day_click_stays_pending() {
        let range = add_day_to_range(ymd(2023, 4, 10), DateRange::pending(ymd(2023, 4, 10)));
        assert_eq!(range, DateRange::pending(ymd(2023, 4, 10)));
    }

    #[test]
    fn test_click_after_resolved_range_starts_over() {
        let current = DateRange::between(ymd(2023, 4, 10), ymd(2023, 4, 15));
        let range = add_day_to_range(ymd(2023, 4, 20), current);
        assert_eq!(range, DateRange::pending(ymd(2023, 4, 20)));
    }

    // ==================== date sequence tests ====================

    #[test]
    fn test_dates_between_inclusive_ascending() {
        let dates = get_dates_between_dates(Some(ymd(2023, 2, 27)), Some(ymd(2023, 3, 2))).unwrap();
        assert_eq!(
            dates,
            vec![ymd(2023, 2, 27), ymd(2023, 2, 28), ymd(2023, 3, 1), ymd(2023, 3, 2)]
        );
    }

    #[test]
    fn test_dates_between_single_day() {
        let dates = get_dates_between_dates(Some(ymd(2023, 3, 1)), Some(ymd(2023, 3, 1))).unwrap();
        assert_eq!(dates, vec![ymd(2023, 3, 1)]);
    }

    #[test]
    fn test_dates_between_missing_end_is_empty() {
        assert!(get_dates_between_dates(Some(ymd(2023, 3, 1)), None).unwrap().is_empty());
        assert!(get_dates_between_dates(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_dates_between_reversed_is_invalid() {
        let err = get_dates_between_dates(Some(ymd(2023, 3, 5)), Some(ymd(2023, 3, 1))).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidRange { .. }));
    }

    #[test]
    fn test_nights_count() {
        assert_eq!(calc_number_of_nights_between_dates(ymd(2023, 3, 1), ymd(2023, 3, 1)).unwrap(), 0);
        assert_eq!(calc_number_of_nights_between_dates(ymd(2023, 3, 1), ymd(2023, 3, 4)).unwrap(), 3);
        assert_eq!(calc_number_of_nights_between_dates(ymd(2023, 12, 30), ymd(2024, 1, 2)).unwrap(), 3);
        assert!(calc_number_of_nights_between_dates(ymd(2023, 3, 4), ymd(2023, 3, 1)).is_err());
    }

    #[test]
    fn test_dates_between_length_matches_nights_plus_one() {
        let start = ymd(2024, 2, 20);
        for offset in 0..40u64 {
            let end = start.checked_add_days(Days::new(offset)).unwrap();
            let dates = get_dates_between_dates(Some(start), Some(end)).unwrap();
            let nights = calc_number_of_nights_between_dates(start, end).unwrap();
            assert_eq!(dates.len() as i64, nights + 1);
        }
    }
}
