//! Environment configuration
//!
//! Read once at startup. A `.env` file in the working directory is loaded
//! first (see `main`), then:
//!
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 3000)
//! - `RULES_PATH`: JSON rules file (default: built-in sample rules)
//! - `HORIZON_DAYS`: days ahead that can be booked (default: 360)
//! - `SAME_DAY_STAY`: `one_night` or `reject` (default: one_night)

use std::path::PathBuf;

use tracing::info;

use crate::calendar::availability::DEFAULT_HORIZON_DAYS;
use crate::calendar::rules::{CalendarRules, SAMPLE_RULES_JSON};
use crate::error::CalendarError;
use crate::pricing::calculators::SameDayStay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rules_path: Option<PathBuf>,
    pub horizon_days: u32,
    pub same_day_stay: SameDayStay,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            rules_path: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
            same_day_stay: SameDayStay::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CalendarError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CalendarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| CalendarError::Config(format!("Invalid PORT '{}'", raw)))?,
            None => defaults.port,
        };

        let horizon_days = match var("HORIZON_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| CalendarError::Config(format!("Invalid HORIZON_DAYS '{}'", raw)))?,
            None => defaults.horizon_days,
        };

        let same_day_stay = match var("SAME_DAY_STAY") {
            Some(raw) => raw.parse::<SameDayStay>()?,
            None => defaults.same_day_stay,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            rules_path: var("RULES_PATH").map(PathBuf::from),
            horizon_days,
            same_day_stay,
        })
    }

    /// Load the rules file, or the sample rules when none is configured
    pub fn load_rules(&self) -> Result<CalendarRules, CalendarError> {
        match &self.rules_path {
            Some(path) => {
                info!("Loading calendar rules from {}", path.display());
                let json = std::fs::read_to_string(path).map_err(|e| {
                    CalendarError::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                CalendarRules::from_json_str(&json)
            }
            None => {
                info!("RULES_PATH not set, using sample calendar rules");
                CalendarRules::from_json_str(SAMPLE_RULES_JSON)
            }
        }
    }
}
