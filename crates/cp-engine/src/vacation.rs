//! Proportional vacation allocation.
//!
//! The annual paid-leave allowance is spread over the two sub-periods of a
//! release cycle in proportion to their calendar length.  Each sub-period is
//! rounded on its own, so the two shares can differ from the allowance by a
//! day; neither share ever exceeds it.

use cp_core::PlannerConfig;
use cp_time::{calendar_days, proportional_split, Date};
use serde::{Deserialize, Serialize};

use crate::milestones::MilestoneDates;

/// Share of `annual_allowance` falling into `[period_start, period_end]`
/// when the whole cycle is `[cycle_start, cycle_end]`.
///
/// Both spans are measured in calendar days.  The result is always in
/// `[0, annual_allowance]`; a zero-length cycle yields 0.
pub fn vacation_for_period(
    period_start: Date,
    period_end: Date,
    cycle_start: Date,
    cycle_end: Date,
    annual_allowance: u32,
) -> u32 {
    proportional_split(
        calendar_days(period_start, period_end),
        calendar_days(cycle_start, cycle_end),
        annual_allowance,
    )
}

/// Inputs of the vacation split, kept for display next to the deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBreakdown {
    /// Allowance being split.
    pub annual_allowance: u32,
    /// Wellness days (informational, not deducted).
    pub wellness_days: u32,
    /// Calendar days of the whole cycle.
    pub cycle_calendar_days: u32,
    /// Calendar days up to Soft Code Complete.
    pub code_complete_calendar_days: u32,
    /// Calendar days after Soft Code Complete.
    pub after_code_complete_calendar_days: u32,
}

/// Vacation days per sub-period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationAllocation {
    /// Days allocated to Execute Commit → Soft Code Complete.
    pub code_complete_period: u32,
    /// Days allocated to Soft Code Complete → GA.
    pub after_code_complete_period: u32,
    /// Inputs of the split.
    pub breakdown: VacationBreakdown,
}

/// Split the configured allowance across the two sub-periods of `dates`.
pub fn allocate_vacation(dates: &MilestoneDates, config: &PlannerConfig) -> VacationAllocation {
    let cycle = dates.cycle();
    let before = dates.code_complete_period();
    let after = dates.after_code_complete_period();
    let share = |start, end| {
        vacation_for_period(start, end, cycle.start, cycle.end, config.annual_pto_days)
    };
    VacationAllocation {
        code_complete_period: share(before.start, before.end),
        after_code_complete_period: share(after.start, after.end),
        breakdown: VacationBreakdown {
            annual_allowance: config.annual_pto_days,
            wellness_days: config.wellness_days,
            cycle_calendar_days: cycle.calendar_days(),
            code_complete_calendar_days: before.calendar_days(),
            after_code_complete_calendar_days: after.calendar_days(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn scenario_split() {
        let dates = MilestoneDates::new(date(2024, 7, 1), date(2024, 9, 1), date(2024, 11, 1));
        let alloc = allocate_vacation(&dates, &PlannerConfig::default());
        assert_eq!(alloc.code_complete_period, 9);
        assert_eq!(alloc.after_code_complete_period, 9);
        assert_eq!(alloc.breakdown.cycle_calendar_days, 123);
        assert_eq!(alloc.breakdown.wellness_days, 3);
    }

    #[test]
    fn rounding_drift_is_kept() {
        // Each half of a two-day cycle is worth 1.5 days of a 3-day pool;
        // both round up, so the shares add up to one more than the pool.
        let a = date(2024, 1, 1);
        let b = a + 1;
        let c = a + 2;
        assert_eq!(vacation_for_period(a, b, a, c, 3), 2);
        assert_eq!(vacation_for_period(b, c, a, c, 3), 2);
    }

    #[test]
    fn degenerate_periods() {
        let a = date(2024, 1, 1);
        assert_eq!(vacation_for_period(a, a, a, a + 100, 18), 0);
        assert_eq!(vacation_for_period(a, a + 10, a, a, 18), 0);
        assert_eq!(vacation_for_period(a, a + 400, a, a + 100, 18), 18);
    }
}
