//! Booking calendar engine: rules store, availability and selection.

pub mod availability;
pub mod clock;
pub mod models;
pub mod month;
pub mod rules;
pub mod selection;

// Re-export commonly used items
pub use availability::{
    add_day_to_range, calc_number_of_nights_between_dates, get_dates_between_dates, Availability,
    DEFAULT_HORIZON_DAYS,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{DateRange, DisabledMatcher, NightKind};
pub use rules::CalendarRules;
pub use selection::{Selection, SelectionRejection, SelectionSummary};
