//! Core pricing calculation functions.
//!
//! Pure functions for nightly pricing math - no I/O. Every night is priced by
//! the date it starts on; the checkout day is never charged.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::availability::calc_number_of_nights_between_dates;
use crate::calendar::models::NightKind;
use crate::calendar::rules::CalendarRules;
use crate::error::CalendarError;

/// How a range with `from == to` is billed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameDayStay {
    /// Treated as one night, checking out the next calendar day
    #[default]
    OneNight,
    /// Rejected as an invalid range
    Reject,
}

impl FromStr for SameDayStay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one_night" => Ok(SameDayStay::OneNight),
            "reject" => Ok(SameDayStay::Reject),
            other => Err(CalendarError::Config(format!(
                "Unknown same-day stay policy '{}' (expected one_night or reject)",
                other
            ))),
        }
    }
}

impl fmt::Display for SameDayStay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameDayStay::OneNight => write!(f, "one_night"),
            SameDayStay::Reject => write!(f, "reject"),
        }
    }
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use rental_calendar::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Nightly price for the night starting on `date`.
///
/// Defined for every date, including past, blocked and booked ones.
pub fn get_cost(rules: &CalendarRules, date: NaiveDate) -> Decimal {
    rules.price_for(date)
}

/// Start dates of every billed night of a stay
pub fn nights_of_stay(
    from: NaiveDate,
    to: NaiveDate,
    policy: SameDayStay,
) -> Result<Vec<NaiveDate>, CalendarError> {
    let nights = calc_number_of_nights_between_dates(from, to)?;

    if nights == 0 {
        return match policy {
            SameDayStay::OneNight => Ok(vec![from]),
            SameDayStay::Reject => Err(CalendarError::SameDayStay { date: from }),
        };
    }

    Ok(from.iter_days().take(nights as usize).collect())
}

/// Sum of nightly prices from `from` up to, not including, `to`
pub fn calc_total_cost_of_stay(
    rules: &CalendarRules,
    from: NaiveDate,
    to: NaiveDate,
    policy: SameDayStay,
) -> Result<Decimal, CalendarError> {
    let total: Decimal = nights_of_stay(from, to, policy)?
        .into_iter()
        .map(|night| get_cost(rules, night))
        .sum();

    Ok(round_money(total, 2))
}

/// One priced night of a stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightLine {
    pub date: NaiveDate,
    pub kind: NightKind,
    pub price: Decimal,
}

/// Nights and total cost of a resolved range
#[derive(Debug, Clone)]
pub struct StayQuote {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub nights: i64,
    pub total: Decimal,
    pub currency: String,
    pub lines: Vec<NightLine>,
}

/// Price every night of a stay.
///
/// `nights` always equals the number of lines summed into `total`.
pub fn quote_stay(
    rules: &CalendarRules,
    from: NaiveDate,
    to: NaiveDate,
    policy: SameDayStay,
) -> Result<StayQuote, CalendarError> {
    let lines: Vec<NightLine> = nights_of_stay(from, to, policy)?
        .into_iter()
        .map(|date| NightLine {
            date,
            kind: NightKind::of(date),
            price: get_cost(rules, date),
        })
        .collect();

    let total = round_money(lines.iter().map(|line| line.price).sum(), 2);

    Ok(StayQuote {
        from,
        to,
        nights: lines.len() as i64,
        total,
        currency: rules.currency().to_string(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules() -> CalendarRules {
        CalendarRules::sample().unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
    }

    // ==================== get_cost tests ====================

    #[test]
    fn test_get_cost_precedence() {
        let rules = rules();
        assert_eq!(get_cost(&rules, ymd(2023, 8, 24)), dec!(100));
        assert_eq!(get_cost(&rules, ymd(2023, 8, 23)), dec!(70));
        assert_eq!(get_cost(&rules, ymd(2023, 9, 1)), dec!(50));
    }

    #[test]
    fn test_get_cost_defined_for_unavailable_days() {
        let rules = rules();
        assert_eq!(get_cost(&rules, ymd(2023, 3, 21)), dec!(30)); // blocked Tuesday
        assert_eq!(get_cost(&rules, ymd(2023, 6, 24)), dec!(50)); // booked Saturday
    }

    #[test]
    fn test_get_cost_is_idempotent() {
        let rules = rules();
        for date in [ymd(2023, 8, 24), ymd(2023, 8, 26), ymd(2023, 9, 1), ymd(2023, 3, 21)] {
            assert_eq!(get_cost(&rules, date), get_cost(&rules, date));
        }
    }

    // ==================== calc_total_cost_of_stay tests ====================

    #[test]
    fn test_total_excludes_checkout_day() {
        let rules = rules();
        // Wed 23 (70) + Thu 24 (100) + Fri 25 (100); checkout Sat 26 not charged
        let total =
            calc_total_cost_of_stay(&rules, ymd(2023, 8, 23), ymd(2023, 8, 26), SameDayStay::OneNight)
                .unwrap();
        assert_eq!(total, dec!(270));
    }

    #[test]
    fn test_total_across_month_boundary() {
        let rules = rules();
        // Wed Aug 30 (70) + Thu Aug 31 (70) + Fri Sep 1 (50) + Sat Sep 2 (50)
        let total =
            calc_total_cost_of_stay(&rules, ymd(2023, 8, 30), ymd(2023, 9, 3), SameDayStay::OneNight)
                .unwrap();
        assert_eq!(total, dec!(240));
    }

    #[test]
    fn test_total_matches_sum_of_nightly_costs() {
        let rules = rules();
        let from = ymd(2023, 7, 20);
        let to = ymd(2023, 9, 10);
        let expected: Decimal = from
            .iter_days()
            .take_while(|d| *d < to)
            .map(|d| get_cost(&rules, d))
            .sum();
        let total = calc_total_cost_of_stay(&rules, from, to, SameDayStay::OneNight).unwrap();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_same_day_one_night_policy() {
        let rules = rules();
        let total =
            calc_total_cost_of_stay(&rules, ymd(2023, 8, 26), ymd(2023, 8, 26), SameDayStay::OneNight)
                .unwrap();
        assert_eq!(total, dec!(170));
    }

    #[test]
    fn test_same_day_reject_policy() {
        let rules = rules();
        let err =
            calc_total_cost_of_stay(&rules, ymd(2023, 8, 26), ymd(2023, 8, 26), SameDayStay::Reject)
                .unwrap_err();
        assert!(matches!(err, CalendarError::SameDayStay { .. }));
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        let rules = rules();
        for policy in [SameDayStay::OneNight, SameDayStay::Reject] {
            let err = calc_total_cost_of_stay(&rules, ymd(2023, 8, 26), ymd(2023, 8, 20), policy)
                .unwrap_err();
            assert!(matches!(err, CalendarError::InvalidRange { .. }));
        }
    }

    // ==================== quote_stay tests ====================

    #[test]
    fn test_quote_lines_match_nights_and_total() {
        let rules = rules();
        let quote =
            quote_stay(&rules, ymd(2023, 8, 24), ymd(2023, 8, 27), SameDayStay::OneNight).unwrap();

        assert_eq!(quote.nights, 3);
        assert_eq!(quote.lines.len(), 3);
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.lines[0].price, dec!(100));
        assert_eq!(quote.lines[2].date, ymd(2023, 8, 26));
        assert_eq!(quote.lines[2].kind, NightKind::Weekend);
        assert_eq!(quote.total, dec!(370));
    }

    #[test]
    fn test_quote_same_day_bills_one_night() {
        let rules = rules();
        let quote =
            quote_stay(&rules, ymd(2023, 9, 4), ymd(2023, 9, 4), SameDayStay::OneNight).unwrap();
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.total, dec!(30));
    }

    #[test]
    fn test_total_rounds_fractional_prices() {
        let rules = CalendarRules::from_json_str(
            r#"{ "costs": { "default_weekday": "33.335", "default_weekend": "33.335" } }"#,
        )
        .unwrap();
        let total =
            calc_total_cost_of_stay(&rules, ymd(2023, 9, 4), ymd(2023, 9, 5), SameDayStay::OneNight)
                .unwrap();
        assert_eq!(total, dec!(33.34));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("one_night".parse::<SameDayStay>().unwrap(), SameDayStay::OneNight);
        assert_eq!(" Reject ".parse::<SameDayStay>().unwrap(), SameDayStay::Reject);
        assert!("free".parse::<SameDayStay>().is_err());
        assert_eq!(SameDayStay::Reject.to_string(), "reject");
    }
}
