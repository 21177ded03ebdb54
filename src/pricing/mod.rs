//! Pricing engine module.
//!
//! Nightly price lookups and stay totals over the calendar rules, plus the
//! JSON DTOs and routes that expose them.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{calc_total_cost_of_stay, get_cost, quote_stay, round_money, SameDayStay, StayQuote};
pub use routes::router;
