//! In-memory caching using moka
//!
//! Month views are cheap to build but requested on every calendar page
//! flip. Keys include the current date, so a cached view never outlives the
//! "today" it was computed for.

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::calendar::month::DayView;

/// (today, year, month)
pub type MonthKey = (NaiveDate, i32, u32);

/// Application cache holding computed month views
#[derive(Clone)]
pub struct AppCache {
    /// Month views ((today, year, month) -> days)
    pub months: Cache<MonthKey, Arc<Vec<DayView>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Month views: 48 entries (two years of pages), 10 min TTL
            months: Cache::builder()
                .max_capacity(48)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            months_size: self.months.entry_count(),
        }
    }

    /// Generate cache key for a month view
    pub fn month_key(today: NaiveDate, year: i32, month: u32) -> MonthKey {
        (today, year, month)
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub months_size: u64,
}
