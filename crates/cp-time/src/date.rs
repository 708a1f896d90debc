//! `Date` type.
//!
//! A date is a count of days relative to 1970-01-01 (day 0).  Only the
//! proleptic Gregorian calendar is modelled and the supported range is
//! 1900-01-01 to 2199-12-31, which comfortably covers any release plan.
//!
//! # Text form
//! Dates display and serialize as ISO `YYYY-MM-DD`.  Parsing also accepts an
//! ISO timestamp (`2024-07-01T09:30:00Z`) and drops everything after the
//! date, so a time-of-day can never leak into a calculation.

use std::str::FromStr;

use cp_core::errors::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::time_unit::TimeUnit;
use crate::weekday::Weekday;

/// A calendar date with day granularity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// Earliest supported year.
    pub const MIN_YEAR: u16 = 1900;

    /// Latest supported year.
    pub const MAX_YEAR: u16 = 2199;

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [{}, {}]",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(days_from_civil(year as i32, month as i32, day as i32)))
    }

    /// Create a date from a day count relative to 1970-01-01.
    pub fn from_days_since_epoch(days: i32) -> Result<Self> {
        let first = days_from_civil(Self::MIN_YEAR as i32, 1, 1);
        let last = days_from_civil(Self::MAX_YEAR as i32, 12, 31);
        if !(first..=last).contains(&days) {
            return Err(Error::Date(format!(
                "day number {days} falls outside [{}, {}]",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }
        Ok(Date(days))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Days relative to 1970-01-01.
    pub fn days_since_epoch(&self) -> i32 {
        self.0
    }

    /// `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        let (y, m, d) = civil_from_days(self.0);
        (y as u16, m as u8, d as u8)
    }

    /// Return the year.
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // Day 0 (1970-01-01) was a Thursday, three days after a Monday.
        Weekday::from_monday_offset(self.0 + 3)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let days = self
            .0
            .checked_add(n)
            .ok_or_else(|| Error::Date(format!("{self} + {n} days overflows")))?;
        Self::from_days_since_epoch(days)
    }

    /// Advance by `n` units.  Month and year steps clamp the day to the end
    /// of the target month (Jan 31 + 1 month = Feb 28/29).
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(n),
            TimeUnit::Weeks => {
                let days = n
                    .checked_mul(7)
                    .ok_or_else(|| Error::Date(format!("{n} weeks overflows")))?;
                self.add_days(days)
            }
            TimeUnit::Months => {
                let (y, m, d) = self.ymd();
                let total = (y as i32 * 12 + (m as i32 - 1))
                    .checked_add(n)
                    .ok_or_else(|| Error::Date(format!("{n} months overflows")))?;
                let new_y = total.div_euclid(12);
                let new_m = (total.rem_euclid(12) + 1) as u8;
                if !(Self::MIN_YEAR as i32..=Self::MAX_YEAR as i32).contains(&new_y) {
                    return Err(Error::Date(format!("year {new_y} out of range")));
                }
                let new_y = new_y as u16;
                Self::from_ymd(new_y, new_m, d.min(days_in_month(new_y, new_m)))
            }
            TimeUnit::Years => {
                let months = n
                    .checked_mul(12)
                    .ok_or_else(|| Error::Date(format!("{n} years overflows")))?;
                self.advance(months, TimeUnit::Months)
            }
        }
    }

    /// Calendar days from `self` to `other`; positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// The first `weekday` on or after this date.
    pub fn next_weekday_on_or_after(self, weekday: Weekday) -> Result<Self> {
        let skip = (weekday.ordinal() as i32 - self.weekday().ordinal() as i32).rem_euclid(7);
        self.add_days(skip)
    }

    /// Inclusive iterator from `self` to `end`; empty when `end < self`.
    pub fn range_to(self, end: Date) -> DateRange {
        DateRange { next: self, end }
    }

    /// Return the *n*-th occurrence of `weekday` in `year`/`month`.
    ///
    /// For example, `nth_weekday(4, Weekday::Thursday, 2024, 11)` is
    /// Thanksgiving 2024 (2024-11-28).
    ///
    /// # Errors
    /// Returns an error if `n` is zero or the month has fewer than `n` such
    /// weekdays.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::Date("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?.next_weekday_on_or_after(weekday)?;
        let day = first.day_of_month() as u16 + 7 * (n as u16 - 1);
        if day > days_in_month(year, month) as u16 {
            return Err(Error::Date(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}"
            )));
        }
        Date::from_ymd(year, month, day as u8)
    }

    /// Return the last occurrence of `weekday` in `year`/`month`.
    pub fn last_weekday(weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        let last = Date::from_ymd(year, month, days_in_month(year, month))?;
        let back = (last.weekday().ordinal() as i32 - weekday.ordinal() as i32).rem_euclid(7);
        last.add_days(-back)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────
//
// Operators do not range-check; use `add_days` when the input is untrusted.

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        Date(self.0 + rhs)
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        Date(self.0 - rhs)
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        self.0 += rhs;
    }
}

// ── Iteration ─────────────────────────────────────────────────────────────────

/// Inclusive day-by-day iterator produced by [`Date::range_to`].
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Date,
    end: Date,
}

impl Iterator for DateRange {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.next > self.end {
            return None;
        }
        let current = self.next;
        self.next += 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRange {}

// ── Text form ─────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let date_part = s.trim().split(['T', ' ']).next().unwrap_or_default();
        let mut parts = date_part.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::Date(format!("'{s}' is not a YYYY-MM-DD date")));
        };
        let field = |text: &str, what: &str| {
            text.parse::<u16>()
                .map_err(|_| Error::Date(format!("'{s}': invalid {what} '{text}'")))
        };
        let year = field(y, "year")?;
        let month = u8::try_from(field(m, "month")?)
            .map_err(|_| Error::Date(format!("'{s}': invalid month '{m}'")))?;
        let day = u8::try_from(field(d, "day")?)
            .map_err(|_| Error::Date(format!("'{s}': invalid day '{d}'")))?;
        Date::from_ymd(year, month, day)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian (y, m, d).
fn days_from_civil(y: i32, m: i32, d: i32) -> i32 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12; // March = 0
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(z: i32) -> (i32, i32, i32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y, m, d)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch() {
        assert_eq!(date(1970, 1, 1).days_since_epoch(), 0);
        assert_eq!(date(1970, 1, 2).days_since_epoch(), 1);
        assert_eq!(date(1969, 12, 31).days_since_epoch(), -1);
        assert_eq!(date(2000, 3, 1).days_since_epoch(), 11_017);
    }

    #[test]
    fn test_roundtrip() {
        let dates = [
            (1900, 1, 1),
            (1900, 3, 1), // 1900 is not a leap year
            (2000, 2, 29),
            (2100, 2, 28),
            (2024, 12, 31),
            (2199, 12, 31),
        ];
        for (y, m, d) in dates {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!(date.ymd(), (y, m, d), "roundtrip mismatch for {y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_invalid_components() {
        assert!(Date::from_ymd(1899, 12, 31).is_err());
        assert!(Date::from_ymd(2200, 1, 1).is_err());
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
        assert!(Date::from_ymd(2024, 4, 0).is_err());
    }

    #[test]
    fn test_weekday() {
        assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
        assert_eq!(date(2024, 1, 1).weekday(), Weekday::Monday);
        assert_eq!(date(2024, 9, 1).weekday(), Weekday::Sunday);
        assert_eq!(date(1900, 1, 1).weekday(), Weekday::Monday);
    }

    #[test]
    fn test_advance() {
        let d = date(2023, 1, 31);
        assert_eq!(d.advance(1, TimeUnit::Months).unwrap(), date(2023, 2, 28));
        assert_eq!(d.advance(-2, TimeUnit::Months).unwrap(), date(2022, 11, 30));
        assert_eq!(d.advance(2, TimeUnit::Weeks).unwrap(), date(2023, 2, 14));
        assert_eq!(date(2024, 2, 29).advance(1, TimeUnit::Years).unwrap(), date(2025, 2, 28));
        assert!(date(2199, 12, 1).advance(1, TimeUnit::Months).is_err());
    }

    #[test]
    fn test_arithmetic() {
        let d = date(2023, 1, 1);
        assert_eq!(d + 31, date(2023, 2, 1));
        assert_eq!(date(2023, 2, 1) - d, 31);
        assert_eq!(d.days_between(date(2023, 2, 1)), 31);
        assert!(date(2199, 12, 31).add_days(1).is_err());
    }

    #[test]
    fn test_nth_and_last_weekday() {
        assert_eq!(
            Date::nth_weekday(4, Weekday::Thursday, 2024, 11).unwrap(),
            date(2024, 11, 28)
        );
        assert_eq!(
            Date::nth_weekday(1, Weekday::Monday, 2024, 9).unwrap(),
            date(2024, 9, 2)
        );
        assert!(Date::nth_weekday(5, Weekday::Wednesday, 2024, 2).is_err());
        assert!(Date::nth_weekday(0, Weekday::Monday, 2024, 1).is_err());
        assert_eq!(
            Date::last_weekday(Weekday::Monday, 2024, 5).unwrap(),
            date(2024, 5, 27)
        );
        assert_eq!(
            Date::last_weekday(Weekday::Friday, 2024, 5).unwrap(),
            date(2024, 5, 31)
        );
    }

    #[test]
    fn test_range_to() {
        let days: Vec<Date> = date(2024, 2, 27).range_to(date(2024, 3, 1)).collect();
        assert_eq!(
            days,
            vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
        assert_eq!(date(2024, 3, 1).range_to(date(2024, 2, 1)).count(), 0);
        assert_eq!(date(2024, 1, 1).range_to(date(2024, 1, 10)).len(), 10);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("2024-07-01".parse::<Date>().unwrap(), date(2024, 7, 1));
        assert_eq!("2024-07-01T23:59:59Z".parse::<Date>().unwrap(), date(2024, 7, 1));
        assert_eq!(date(2024, 7, 1).to_string(), "2024-07-01");
        assert_eq!(format!("{:?}", date(2024, 7, 1)), "Date(2024-07-01)");
        assert!("2024-07".parse::<Date>().is_err());
        assert!("2024-07-01-01".parse::<Date>().is_err());
        assert!("July 1st".parse::<Date>().is_err());
        assert!("2024-02-30".parse::<Date>().is_err());
        assert!("2024-300-01".parse::<Date>().is_err());
    }
}
