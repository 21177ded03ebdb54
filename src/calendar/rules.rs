//! Calendar rules store.
//!
//! Immutable pricing and availability configuration for the property:
//! global weekday/weekend prices, month-level and exact-day price overrides,
//! and the blocked and booked day sets. Loaded once, then shared read-only.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CalendarError;

use super::models::{DateRange, NightKind};

/// year -> month -> list of days
pub type DayTable = BTreeMap<String, BTreeMap<String, Vec<u32>>>;

/// year -> month -> (`default_weekday` | `default_weekend` | day) -> price
pub type PriceOverrideTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, Decimal>>>;

const MONTH_WEEKDAY_KEY: &str = "default_weekday";
const MONTH_WEEKEND_KEY: &str = "default_weekend";

/// Rules used when no rules file is configured
pub const SAMPLE_RULES_JSON: &str = r#"{
  "currency": "USD",
  "costs": {
    "default_weekday": 30,
    "default_weekend": 50,
    "custom": {
      "2023": {
        "8": { "default_weekday": 70, "default_weekend": 170, "24": 100, "25": 100 }
      }
    }
  },
  "blocked": { "2023": { "3": [20, 21, 22] } },
  "booked": { "2023": { "6": [17, 24, 25] } }
}"#;

/// On-disk shape of the rules configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesDocument {
    #[serde(default = "default_currency")]
    pub currency: String,
    pub costs: CostsDocument,
    #[serde(default)]
    pub blocked: DayTable,
    #[serde(default)]
    pub booked: DayTable,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Pricing section of the rules configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostsDocument {
    pub default_weekday: Decimal,
    pub default_weekend: Decimal,
    #[serde(default)]
    pub custom: PriceOverrideTable,
}

/// Weekday and weekend prices of a single tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightPrices {
    pub weekday: Decimal,
    pub weekend: Decimal,
}

impl NightPrices {
    pub fn for_kind(&self, kind: NightKind) -> Decimal {
        match kind {
            NightKind::Weekday => self.weekday,
            NightKind::Weekend => self.weekend,
        }
    }
}

/// Month-level override; either side may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthPrices {
    pub weekday: Option<Decimal>,
    pub weekend: Option<Decimal>,
}

impl MonthPrices {
    pub fn for_kind(&self, kind: NightKind) -> Option<Decimal> {
        match kind {
            NightKind::Weekday => self.weekday,
            NightKind::Weekend => self.weekend,
        }
    }
}

/// Flattened, validated rules
#[derive(Debug, Clone)]
pub struct CalendarRules {
    currency: String,
    defaults: NightPrices,
    month_prices: BTreeMap<(i32, u32), MonthPrices>,
    day_prices: BTreeMap<NaiveDate, Decimal>,
    blocked: BTreeSet<NaiveDate>,
    booked: BTreeSet<NaiveDate>,
}

impl CalendarRules {
    /// Parse and validate a JSON rules document
    pub fn from_json_str(json: &str) -> Result<Self, CalendarError> {
        let document: RulesDocument = serde_json::from_str(json)
            .map_err(|e| CalendarError::Config(format!("Invalid rules document: {}", e)))?;
        Self::from_document(document)
    }

    /// The built-in sample rules
    pub fn sample() -> Result<Self, CalendarError> {
        Self::from_json_str(SAMPLE_RULES_JSON)
    }

    /// Validate a rules document and flatten its nested tables
    pub fn from_document(document: RulesDocument) -> Result<Self, CalendarError> {
        let currency = document.currency.trim().to_uppercase();
        if currency.is_empty() {
            return Err(CalendarError::Config("Currency must not be empty".to_string()));
        }

        check_price(document.costs.default_weekday, "costs.default_weekday")?;
        check_price(document.costs.default_weekend, "costs.default_weekend")?;

        let mut month_prices = BTreeMap::new();
        let mut day_prices = BTreeMap::new();

        for (year_key, months) in &document.costs.custom {
            let year = parse_year(year_key)?;
            for (month_key, entries) in months {
                let month = parse_month(month_key)?;
                let mut month_override = MonthPrices::default();

                for (key, price) in entries {
                    let path = format!("costs.custom.{}.{}.{}", year_key, month_key, key);
                    check_price(*price, &path)?;
                    match key.as_str() {
                        MONTH_WEEKDAY_KEY => month_override.weekday = Some(*price),
                        MONTH_WEEKEND_KEY => month_override.weekend = Some(*price),
                        day_key => {
                            let date = parse_day(year, month, day_key)?;
                            day_prices.insert(date, *price);
                        }
                    }
                }

                if month_override != MonthPrices::default() {
                    month_prices.insert((year, month), month_override);
                }
            }
        }

        let blocked = flatten_days(&document.blocked, "blocked")?;
        let booked = flatten_days(&document.booked, "booked")?;

        info!(
            "Loaded calendar rules: {} month overrides, {} day overrides, {} blocked days, {} booked days",
            month_prices.len(),
            day_prices.len(),
            blocked.len(),
            booked.len()
        );

        Ok(Self {
            currency,
            defaults: NightPrices {
                weekday: document.costs.default_weekday,
                weekend: document.costs.default_weekend,
            },
            month_prices,
            day_prices,
            blocked,
            booked,
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn defaults(&self) -> NightPrices {
        self.defaults
    }

    /// Nightly price for the night starting on `date`.
    ///
    /// Exact-day override, then the month's weekday/weekend override, then
    /// the global default. Never fails.
    pub fn price_for(&self, date: NaiveDate) -> Decimal {
        let kind = NightKind::of(date);

        self.day_prices
            .get(&date)
            .copied()
            .or_else(|| {
                self.month_prices
                    .get(&(date.year(), date.month()))
                    .and_then(|month| month.for_kind(kind))
            })
            .unwrap_or_else(|| self.defaults.for_kind(kind))
    }

    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.blocked.contains(&date)
    }

    pub fn is_booked(&self, date: NaiveDate) -> bool {
        self.booked.contains(&date)
    }

    /// Blocked days, consecutive days collapsed into one range
    pub fn blocked_ranges(&self) -> Vec<DateRange> {
        collapse_days(&self.blocked)
    }

    /// Booked days, consecutive days collapsed into one range
    pub fn booked_ranges(&self) -> Vec<DateRange> {
        collapse_days(&self.booked)
    }
}

fn check_price(price: Decimal, path: &str) -> Result<(), CalendarError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CalendarError::Config(format!(
            "Price at {} must not be negative (got {})",
            path, price
        )));
    }
    Ok(())
}

fn parse_year(key: &str) -> Result<i32, CalendarError> {
    key.trim()
        .parse::<i32>()
        .map_err(|_| CalendarError::Config(format!("Invalid year key '{}'", key)))
}

fn parse_month(key: &str) -> Result<u32, CalendarError> {
    match key.trim().parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(CalendarError::Config(format!("Invalid month key '{}'", key))),
    }
}

fn parse_day(year: i32, month: u32, key: &str) -> Result<NaiveDate, CalendarError> {
    let day = key
        .trim()
        .parse::<u32>()
        .map_err(|_| CalendarError::Config(format!("Invalid day key '{}' in {}-{:02}", key, year, month)))?;
    checked_date(year, month, day)
}

fn checked_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CalendarError::Config(format!("Day {} does not exist in {}-{:02}", day, year, month))
    })
}

fn flatten_days(table: &DayTable, section: &str) -> Result<BTreeSet<NaiveDate>, CalendarError> {
    let mut days = BTreeSet::new();
    for (year_key, months) in table {
        let year = parse_year(year_key)
            .map_err(|e| CalendarError::Config(format!("{}: {}", section, e)))?;
        for (month_key, month_days) in months {
            let month = parse_month(month_key)
                .map_err(|e| CalendarError::Config(format!("{}: {}", section, e)))?;
            for day in month_days {
                days.insert(checked_date(year, month, *day)?);
            }
        }
    }
    Ok(days)
}

fn collapse_days(days: &BTreeSet<NaiveDate>) -> Vec<DateRange> {
    let mut ranges: Vec<(NaiveDate, NaiveDate)> = Vec::new();

    for &day in days {
        match ranges.last_mut() {
            Some((_, end)) if end.succ_opt() == Some(day) => *end = day,
            _ => ranges.push((day, day)),
        }
    }

    ranges
        .into_iter()
        .map(|(from, to)| DateRange::between(from, to))
        .collect()
}
