//! HTTP route handlers

pub mod calendar;

use axum::{extract::State, Json};
use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::pricing::responses::HealthResponse;
use crate::AppState;

/// Reject ranges spanning more days than can ever be booked.
///
/// Reversed ranges pass through; the engine reports them as invalid.
pub fn ensure_range_within_horizon(
    state: &AppState,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let (Some(from), Some(to)) = (from, to) else {
        return Ok(());
    };

    let max_nights = i64::from(state.availability.horizon_days());
    let nights = to.signed_duration_since(from).num_days();
    if nights > max_nights {
        return Err(AppError::BadRequest(format!(
            "Range {} to {} spans {} days; at most {} are allowed",
            from,
            to,
            nights + 1,
            max_nights + 1
        )));
    }
    Ok(())
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: state.cache.stats(),
    })
}
