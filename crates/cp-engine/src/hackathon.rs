//! Company hackathon rule.
//!
//! Every year the company stops regular work for three days: the Tuesday,
//! Wednesday, and Thursday of the week that contains the first Tuesday of
//! February.

use cp_core::errors::Result;
use cp_time::{Date, Weekday};
use serde::{Deserialize, Serialize};

/// Number of hackathon days per calendar year.
pub const HACKATHON_DAYS: usize = 3;

/// One hackathon day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HackathonOccurrence {
    /// The hackathon date.
    pub date: Date,
    /// Why the day is blocked.
    pub reason: String,
}

/// Tuesday, Wednesday, and Thursday of the first full hackathon week of
/// February `year`.
pub fn hackathon_dates_for_year(year: u16) -> Result<[Date; HACKATHON_DAYS]> {
    let tuesday = Date::from_ymd(year, 2, 1)?.next_weekday_on_or_after(Weekday::Tuesday)?;
    Ok([tuesday, tuesday.add_days(1)?, tuesday.add_days(2)?])
}

/// Hackathon days inside `[start, end]`, in date order.
pub fn hackathon_in_range(start: Date, end: Date) -> Result<Vec<HackathonOccurrence>> {
    if start > end {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for year in start.year()..=end.year() {
        for date in hackathon_dates_for_year(year)? {
            if start <= date && date <= end {
                found.push(HackathonOccurrence {
                    date,
                    reason: format!("Company hackathon {year} ({})", date.weekday()),
                });
            }
        }
    }
    Ok(found)
}
