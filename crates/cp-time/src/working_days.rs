//! Working-day utility.
//!
//! Only Monday–Friday count as working days.  Holidays are *not* removed
//! here; callers subtract them as separate deductions so that every
//! deduction stays visible in the result.

use crate::date::Date;

/// Return `true` if `date` falls on Monday–Friday.
pub fn is_working_day(date: Date) -> bool {
    date.weekday().is_working_day()
}

/// Number of Monday–Friday dates in `[start, end]`, both ends inclusive.
///
/// `start > end` yields 0.  Splitting a range at a date `b` and counting both
/// halves counts `b` twice, so
/// `working_days(a, b) + working_days(b, c) == working_days(a, c) + is_working_day(b)`
/// for `a <= b <= c`.
pub fn working_days(start: Date, end: Date) -> u32 {
    start.range_to(end).filter(|d| is_working_day(*d)).count() as u32
}

/// Calendar days from `start` to `end` (`end − start`), never negative.
pub fn calendar_days(start: Date, end: Date) -> u32 {
    start.days_between(end).max(0) as u32
}

/// `round(period_days / total_days * pool)`, clamped to `[0, pool]`.
///
/// A zero `total_days` yields 0 instead of dividing by zero.
pub fn proportional_split(period_days: u32, total_days: u32, pool: u32) -> u32 {
    if total_days == 0 {
        return 0;
    }
    let share = (period_days as f64 / total_days as f64) * pool as f64;
    share.round().clamp(0.0, pool as f64) as u32
}
