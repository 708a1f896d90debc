//! Threshold-based insight and recommendation text.
//!
//! Both generators are pure functions of [`CapacitySignals`]: the same
//! signals always give the same strings in the same order.

use cp_time::TimeUnit;

use crate::milestones::MilestoneDates;

/// Efficiency above which the plan is called healthy, in percent.
pub const HIGH_EFFICIENCY: f64 = 80.0;
/// Efficiency below which the plan is called strained, in percent.
pub const LOW_EFFICIENCY: f64 = 60.0;
/// Efficiency below which scope or timeline changes are suggested.
pub const RECOMMEND_EFFICIENCY: f64 = 70.0;
/// Holiday days above which the cycle is called holiday-heavy.
pub const INSIGHT_HOLIDAYS: u32 = 10;
/// Holiday days above which milestone placement advice is given.
pub const RECOMMEND_HOLIDAYS: u32 = 8;
/// Vacation days above which the allowance is mentioned.
pub const INSIGHT_VACATION: u32 = 5;
/// Vacation days above which early coordination is suggested.
pub const RECOMMEND_VACATION: u32 = 4;
/// Code-complete phases shorter than this many calendar days are flagged.
pub const SHORT_CODE_COMPLETE_DAYS: u32 = 30;

/// The figures the text generators look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitySignals {
    /// Execute Commit → GA in calendar days.
    pub cycle_calendar_days: u32,
    /// GA falls after Execute Commit + 6 months.
    pub longer_than_six_months: bool,
    /// GA falls before Execute Commit + 3 months.
    pub shorter_than_three_months: bool,
    /// Execute Commit → Soft Code Complete in calendar days.
    pub code_complete_calendar_days: u32,
    /// Available share of working days, in percent.
    pub efficiency: f64,
    /// Holiday days deducted.
    pub holiday_days: u32,
    /// Hackathon days deducted.
    pub hackathon_days: u32,
    /// Vacation days deducted.
    pub vacation_days: u32,
}

impl CapacitySignals {
    /// Derive the span-related signals from `dates`; deduction figures
    /// start at zero and are filled in by the caller.
    ///
    /// A month boundary past the last supported date lies after any
    /// representable GA, so such a plan is never longer than six months
    /// and always shorter than three.
    pub fn for_dates(dates: &MilestoneDates) -> Self {
        let months_after = |n: i32| dates.execute_commit.advance(n, TimeUnit::Months).ok();
        Self {
            cycle_calendar_days: dates.cycle().calendar_days(),
            longer_than_six_months: months_after(6).is_some_and(|limit| dates.ga > limit),
            shorter_than_three_months: months_after(3).map_or(true, |limit| dates.ga < limit),
            code_complete_calendar_days: dates.code_complete_period().calendar_days(),
            efficiency: 0.0,
            holiday_days: 0,
            hackathon_days: 0,
            vacation_days: 0,
        }
    }
}

/// Observations about the plan.
pub fn insights(signals: &CapacitySignals) -> Vec<String> {
    let mut out = Vec::new();
    if signals.longer_than_six_months {
        out.push(format!(
            "Long release cycle: {} calendar days from Execute Commit to GA is more than six months.",
            signals.cycle_calendar_days
        ));
    }
    if signals.shorter_than_three_months {
        out.push(format!(
            "Short release cycle: {} calendar days from Execute Commit to GA is less than three months.",
            signals.cycle_calendar_days
        ));
    }
    if signals.efficiency > HIGH_EFFICIENCY {
        out.push(format!(
            "High efficiency: {:.1}% of working days remain available for delivery.",
            signals.efficiency
        ));
    }
    if signals.efficiency < LOW_EFFICIENCY {
        out.push(format!(
            "Low efficiency: only {:.1}% of working days remain after deductions.",
            signals.efficiency
        ));
    }
    if signals.holiday_days > INSIGHT_HOLIDAYS {
        out.push(format!(
            "Holiday-heavy cycle: {} holiday days fall between Execute Commit and GA.",
            signals.holiday_days
        ));
    }
    if signals.hackathon_days > 0 {
        out.push(format!(
            "The company hackathon takes {} working days out of this cycle.",
            signals.hackathon_days
        ));
    }
    if signals.vacation_days > INSIGHT_VACATION {
        out.push(format!(
            "{} days of paid leave are allocated to this cycle.",
            signals.vacation_days
        ));
    }
    out
}

/// Suggested actions.
pub fn recommendations(signals: &CapacitySignals) -> Vec<String> {
    let mut out = Vec::new();
    if signals.efficiency < RECOMMEND_EFFICIENCY {
        out.push(format!(
            "Reduce scope or move GA out: {:.1}% efficiency leaves little slack.",
            signals.efficiency
        ));
    }
    if signals.holiday_days > RECOMMEND_HOLIDAYS {
        out.push(format!(
            "Keep milestone deadlines clear of the {} holiday days in this cycle.",
            signals.holiday_days
        ));
    }
    if signals.hackathon_days > 0 {
        out.push("Avoid scheduling milestone deadlines during hackathon week.".to_string());
    }
    if signals.vacation_days > RECOMMEND_VACATION {
        out.push(format!(
            "Collect vacation plans early; {} days of leave are expected.",
            signals.vacation_days
        ));
    }
    if signals.code_complete_calendar_days < SHORT_CODE_COMPLETE_DAYS {
        out.push(format!(
            "Only {} calendar days until Soft Code Complete; confirm the committed scope fits.",
            signals.code_complete_calendar_days
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_time::Date;

    fn quiet() -> CapacitySignals {
        CapacitySignals {
            cycle_calendar_days: 120,
            longer_than_six_months: false,
            shorter_than_three_months: false,
            code_complete_calendar_days: 60,
            efficiency: 75.0,
            holiday_days: 2,
            hackathon_days: 0,
            vacation_days: 3,
        }
    }

    #[test]
    fn nothing_triggers() {
        assert!(insights(&quiet()).is_empty());
        assert!(recommendations(&quiet()).is_empty());
    }

    #[test]
    fn everything_triggers_in_order() {
        let signals = CapacitySignals {
            longer_than_six_months: true,
            efficiency: 50.0,
            holiday_days: 11,
            hackathon_days: 3,
            vacation_days: 6,
            code_complete_calendar_days: 20,
            ..quiet()
        };
        let found = insights(&signals);
        assert_eq!(found.len(), 5);
        assert!(found[0].starts_with("Long release cycle"));
        assert!(found[1].starts_with("Low efficiency: only 50.0%"));
        assert!(found[2].starts_with("Holiday-heavy"));
        assert!(found[3].contains("hackathon"));
        assert!(found[4].starts_with("6 days of paid leave"));

        let recs = recommendations(&signals);
        assert_eq!(recs.len(), 5);
        assert!(recs[0].starts_with("Reduce scope"));
        assert!(recs[4].starts_with("Only 20 calendar days"));
        assert_eq!(recommendations(&signals), recs);
    }

    #[test]
    fn thresholds_are_strict() {
        let signals = CapacitySignals {
            efficiency: 80.0,
            holiday_days: 10,
            vacation_days: 5,
            ..quiet()
        };
        assert!(insights(&signals).is_empty());
        let signals = CapacitySignals {
            efficiency: 70.0,
            holiday_days: 8,
            vacation_days: 4,
            code_complete_calendar_days: 30,
            ..quiet()
        };
        assert!(recommendations(&signals).is_empty());
    }

    #[test]
    fn short_and_high_efficiency() {
        let signals = CapacitySignals {
            shorter_than_three_months: true,
            efficiency: 85.0,
            ..quiet()
        };
        let found = insights(&signals);
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with("Short release cycle"));
        assert!(found[1].starts_with("High efficiency: 85.0%"));
    }

    #[test]
    fn month_spans_use_calendar_months() {
        let d = |s: &str| s.parse::<Date>().unwrap();
        let six_months = MilestoneDates::new(d("2024-01-31"), d("2024-04-01"), d("2024-07-31"));
        let signals = CapacitySignals::for_dates(&six_months);
        assert!(!signals.longer_than_six_months);
        let longer = MilestoneDates::new(d("2024-01-31"), d("2024-04-01"), d("2024-08-01"));
        assert!(CapacitySignals::for_dates(&longer).longer_than_six_months);
        let short = MilestoneDates::new(d("2024-01-01"), d("2024-02-01"), d("2024-03-31"));
        assert!(CapacitySignals::for_dates(&short).shorter_than_three_months);
    }

    #[test]
    fn month_spans_near_the_last_supported_year() {
        let d = |s: &str| s.parse::<Date>().unwrap();
        let late = MilestoneDates::new(d("2199-07-01"), d("2199-09-01"), d("2199-10-01"));
        let signals = CapacitySignals::for_dates(&late);
        assert!(!signals.longer_than_six_months);
        assert!(!signals.shorter_than_three_months);

        let latest = MilestoneDates::new(d("2199-11-01"), d("2199-11-15"), d("2199-12-31"));
        let signals = CapacitySignals::for_dates(&latest);
        assert!(!signals.longer_than_six_months);
        assert!(signals.shorter_than_three_months);
    }
}
