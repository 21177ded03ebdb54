//! Calendar route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;

use crate::calendar::availability::get_dates_between_dates;
use crate::calendar::models::{DateRange, NightKind};
use crate::calendar::month::{month_view, DayView};
use crate::calendar::selection::{evaluate_range, Selection};
use crate::cache::AppCache;
use crate::error::Result;
use crate::pricing::calculators::get_cost;
use crate::pricing::requests::{ClickRequest, DatesQuery};
use crate::pricing::responses::{
    DatesResponse, DayResponse, DisabledResponse, MoneyResponse, MonthDayResponse, MonthResponse,
    SelectionResponse,
};
use crate::AppState;

use super::ensure_range_within_horizon;

/// GET /v1/days/:date
pub async fn day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<DayResponse> {
    let rules = state.availability.rules();

    Json(DayResponse {
        date,
        selectable: state.availability.is_day_selectable(date),
        price: MoneyResponse::new(get_cost(rules, date), rules.currency()),
        night_kind: NightKind::of(date),
    })
}

/// GET /v1/months/:year/:month
pub async fn month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthResponse>> {
    let today = state.availability.today();
    let key = AppCache::month_key(today, year, month);

    let days: Arc<Vec<DayView>> = if let Some(cached) = state.cache.months.get(&key).await {
        tracing::debug!("Cache HIT for month view: {}-{:02}", year, month);
        cached
    } else {
        tracing::debug!("Cache MISS for month view: {}-{:02}", year, month);
        let days = Arc::new(month_view(&state.availability, year, month, today)?);
        state.cache.months.insert(key, days.clone()).await;
        days
    };

    let currency = state.availability.rules().currency();

    Ok(Json(MonthResponse {
        year,
        month,
        days: days
            .iter()
            .map(|view| MonthDayResponse::from_view(view, currency))
            .collect(),
    }))
}

/// GET /v1/disabled
pub async fn disabled(State(state): State<AppState>) -> Json<DisabledResponse> {
    let today = state.availability.today();

    Json(DisabledResponse {
        today,
        horizon: state.availability.horizon_from(today),
        matchers: state.availability.disabled_matchers(),
    })
}

/// GET /v1/dates?from=&to=
pub async fn dates(
    State(state): State<AppState>,
    Query(query): Query<DatesQuery>,
) -> Result<Json<DatesResponse>> {
    ensure_range_within_horizon(&state, query.from, query.to)?;
    let dates = get_dates_between_dates(query.from, query.to)?;

    Ok(Json(DatesResponse {
        count: dates.len(),
        dates,
    }))
}

/// POST /v1/selection/click
///
/// The client sends its current selection with the clicked day; the
/// server keeps no selection state between requests. A rejected click
/// returns the prior selection priced again, or 0 nights when the prior
/// selection was empty or is no longer valid.
pub async fn click(
    State(state): State<AppState>,
    Json(request): Json<ClickRequest>,
) -> Json<SelectionResponse> {
    let prior = DateRange {
        from: request.from,
        to: request.to,
    };
    let mut selection = Selection::from_range(prior);
    let currency = state.availability.rules().currency();

    let response = match selection.click(request.clicked, &state.availability, state.same_day_stay) {
        Ok(summary) => SelectionResponse {
            accepted: true,
            range: summary.range,
            nights: summary.nights,
            total: Some(MoneyResponse::new(summary.total, currency)),
            reason: None,
            message: None,
        },
        Err(rejection) => {
            let prior_summary = evaluate_range(prior, &state.availability, state.same_day_stay).ok();
            SelectionResponse {
                accepted: false,
                range: prior,
                nights: prior_summary.as_ref().map_or(0, |summary| summary.nights),
                total: prior_summary.map(|summary| MoneyResponse::new(summary.total, currency)),
                reason: Some(rejection),
                message: Some(rejection.message().to_string()),
            }
        }
    };

    Json(response)
}
