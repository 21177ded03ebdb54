//! Availability and nightly pricing engine for a single rental property.
//!
//! The engine decides which calendar days can be booked, resolves day clicks
//! into checkin/checkout ranges, and prices stays under a layered cost model
//! (global defaults, month overrides, exact-day overrides). It is exposed as
//! a JSON service for the calendar front end.

pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::cache::AppCache;
use crate::calendar::{Availability, CalendarRules, Clock};
use crate::config::AppConfig;
use crate::pricing::SameDayStay;

/// Shared application state.
///
/// Rules are read-only after load and shared by every request; selection
/// state travels with each request.
#[derive(Clone)]
pub struct AppState {
    pub availability: Availability,
    pub same_day_stay: SameDayStay,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(
        rules: CalendarRules,
        clock: Arc<dyn Clock>,
        horizon_days: u32,
        same_day_stay: SameDayStay,
    ) -> Self {
        Self {
            availability: Availability::new(Arc::new(rules), clock, horizon_days),
            same_day_stay,
            cache: AppCache::new(),
        }
    }

    pub fn from_config(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, error::CalendarError> {
        let rules = config.load_rules()?;
        Ok(Self::new(
            rules,
            clock,
            config.horizon_days,
            config.same_day_stay,
        ))
    }
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/days/:date", get(routes::calendar::day))
        .route("/months/:year/:month", get(routes::calendar::month))
        .route("/disabled", get(routes::calendar::disabled))
        .route("/dates", get(routes::calendar::dates))
        .route("/selection/click", post(routes::calendar::click))
        .merge(pricing::router());

    Router::new()
        .route("/health", get(routes::health))
        .nest("/v1", api_v1)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
