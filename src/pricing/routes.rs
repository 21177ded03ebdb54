//! Pricing route handlers

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::routes::ensure_range_within_horizon;
use crate::AppState;

use super::calculators::quote_stay;
use super::requests::QuoteQuery;
use super::responses::QuoteResponse;

/// Pricing routes, nested under `/v1`
pub fn router() -> Router<AppState> {
    Router::new().route("/quote", get(quote))
}

/// GET /v1/quote?from=&to=
///
/// Nights and total cost of a stay. The checkout day is not charged.
/// Stays longer than the booking horizon are rejected.
pub async fn quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>> {
    ensure_range_within_horizon(&state, Some(query.from), Some(query.to))?;
    let quote = quote_stay(
        state.availability.rules(),
        query.from,
        query.to,
        state.same_day_stay,
    )?;

    tracing::debug!(
        "Quoted {} -> {}: {} nights, total {}",
        quote.from,
        quote.to,
        quote.nights,
        quote.total
    );

    Ok(Json(quote.into()))
}
