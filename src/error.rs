//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;

use crate::pricing::responses::PricingErrorResponse;

/// Errors raised by the availability and pricing engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Same-day stays are not allowed ({date})")]
    SameDayStay { date: NaiveDate },

    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Calendar(CalendarError::InvalidRange { .. })
            | AppError::Calendar(CalendarError::SameDayStay { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_range", self.to_string())
            }
            AppError::Calendar(CalendarError::InvalidMonth { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_month", self.to_string())
            }
            AppError::Calendar(CalendarError::Config(msg)) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    "Configuration error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
