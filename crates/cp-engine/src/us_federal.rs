//! United States federal holidays.
//!
//! Holidays:
//! * New Year's Day (Jan 1)
//! * Martin Luther King Jr. Day (3rd Mon in Jan, from 1983)
//! * Presidents' Day (3rd Mon in Feb)
//! * Memorial Day (last Mon in May)
//! * Juneteenth (Jun 19, from 2021)
//! * Independence Day (Jul 4)
//! * Labor Day (1st Mon in Sep)
//! * Columbus Day (2nd Mon in Oct)
//! * Veterans Day (Nov 11)
//! * Thanksgiving Day (4th Thu in Nov)
//! * Christmas Day (Dec 25)
//!
//! Fixed-date holidays on a Saturday are observed the Friday before, on a
//! Sunday the Monday after.  The observed day is what gets reported, so a
//! New Year's Day falling on Saturday shows up as December 31 of the
//! previous year and is listed under that year.

use async_trait::async_trait;
use cp_core::errors::{Error, Result};
use cp_time::{Date, Weekday};

use crate::holiday::{HolidayKind, HolidayOccurrence, HolidaySource};

/// Region code served by [`UsFederalHolidays`].
pub const REGION: &str = "US";

/// Built-in holiday source for US federal holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsFederalHolidays;

impl UsFederalHolidays {
    /// All federal holidays whose observed date falls inside `year`, in date
    /// order.
    pub fn holidays_for_year(year: u16) -> Result<Vec<HolidayOccurrence>> {
        let mut holidays = Vec::with_capacity(12);

        // New Year's Day of `year`, unless it is observed in the previous
        // December; and next year's, if it is observed on December 31.
        let new_year = observed("New Year's Day", year, 1, 1)?;
        if new_year.date.year() == year {
            holidays.push(new_year);
        }
        if year < Date::MAX_YEAR {
            let next = observed("New Year's Day", year + 1, 1, 1)?;
            if next.date.year() == year {
                holidays.push(next);
            }
        }

        if year >= 1983 {
            holidays.push(floating(
                "Martin Luther King Jr. Day",
                Date::nth_weekday(3, Weekday::Monday, year, 1)?,
            ));
        }
        holidays.push(floating(
            "Presidents' Day",
            Date::nth_weekday(3, Weekday::Monday, year, 2)?,
        ));
        holidays.push(floating(
            "Memorial Day",
            Date::last_weekday(Weekday::Monday, year, 5)?,
        ));
        if year >= 2021 {
            holidays.push(observed("Juneteenth", year, 6, 19)?);
        }
        holidays.push(observed("Independence Day", year, 7, 4)?);
        holidays.push(floating(
            "Labor Day",
            Date::nth_weekday(1, Weekday::Monday, year, 9)?,
        ));
        holidays.push(floating(
            "Columbus Day",
            Date::nth_weekday(2, Weekday::Monday, year, 10)?,
        ));
        holidays.push(observed("Veterans Day", year, 11, 11)?);
        holidays.push(floating(
            "Thanksgiving Day",
            Date::nth_weekday(4, Weekday::Thursday, year, 11)?,
        ));
        holidays.push(observed("Christmas Day", year, 12, 25)?);

        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }
}

#[async_trait]
impl HolidaySource for UsFederalHolidays {
    fn name(&self) -> &str {
        "US federal calendar"
    }

    async fn list_holidays(&self, year: u16, region: &str) -> Result<Vec<HolidayOccurrence>> {
        if !region.trim().eq_ignore_ascii_case(REGION) {
            return Err(Error::HolidaySource {
                region: region.to_string(),
                year,
                reason: format!("{} only serves region {REGION}", self.name()),
            });
        }
        Self::holidays_for_year(year).map_err(|e| Error::HolidaySource {
            region: region.to_string(),
            year,
            reason: e.to_string(),
        })
    }
}

fn floating(name: &str, date: Date) -> HolidayOccurrence {
    HolidayOccurrence::new(name, date, HolidayKind::Floating)
}

/// A fixed-date holiday moved off the weekend.
fn observed(name: &str, year: u16, month: u8, day: u8) -> Result<HolidayOccurrence> {
    let actual = Date::from_ymd(year, month, day)?;
    let shift = match actual.weekday() {
        Weekday::Saturday => -1,
        Weekday::Sunday => 1,
        _ => 0,
    };
    if shift == 0 {
        return Ok(HolidayOccurrence::new(name, actual, HolidayKind::Fixed));
    }
    Ok(HolidayOccurrence::new(
        format!("{name} (observed)"),
        actual.add_days(shift)?,
        HolidayKind::Fixed,
    ))
}
