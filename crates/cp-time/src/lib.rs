//! # cp-time
//!
//! Date, weekday, and working-day arithmetic.
//!
//! All calculations happen at day granularity; there is no time-of-day
//! component anywhere in this crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// `TimeUnit`: calendar step sizes.
pub mod time_unit;

/// `Weekday`: day of the week.
pub mod weekday;

/// Working-day counts, calendar-day spans, proportional splits.
pub mod working_days;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::{Date, DateRange};
pub use time_unit::TimeUnit;
pub use weekday::Weekday;
pub use working_days::{calendar_days, is_working_day, proportional_split, working_days};
