//! Availability result records.
//!
//! Every deduction is reported as a [`DeductionBucket`]: one count per
//! sub-period, their sum, and a typed breakdown of what was deducted.  The
//! bucket fields are private so that `total` cannot drift from the two
//! period counts.

use serde::{Deserialize, Serialize};

use crate::hackathon::HackathonOccurrence;
use crate::holiday::HolidayOccurrence;
use crate::milestones::MilestoneDates;
use crate::vacation::VacationBreakdown;

/// Items split by sub-period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSplit<T> {
    /// Items in Execute Commit → Soft Code Complete.
    pub code_complete_period: Vec<T>,
    /// Items in Soft Code Complete → GA.
    pub after_code_complete_period: Vec<T>,
}

impl<T> PeriodSplit<T> {
    /// Iterate over both periods, earlier period first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.code_complete_period
            .iter()
            .chain(self.after_code_complete_period.iter())
    }
}

/// Days deducted per sub-period, with `total` always equal to their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBucket<B> {
    total: u32,
    code_complete_period: u32,
    after_code_complete_period: u32,
    breakdown: B,
}

impl<B> DeductionBucket<B> {
    /// Build a bucket; `total` is derived.
    pub fn new(code_complete_period: u32, after_code_complete_period: u32, breakdown: B) -> Self {
        Self {
            total: code_complete_period + after_code_complete_period,
            code_complete_period,
            after_code_complete_period,
            breakdown,
        }
    }

    /// Sum of both periods.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Days deducted before Soft Code Complete.
    pub fn code_complete_period(&self) -> u32 {
        self.code_complete_period
    }

    /// Days deducted after Soft Code Complete.
    pub fn after_code_complete_period(&self) -> u32 {
        self.after_code_complete_period
    }

    /// What was deducted.
    pub fn breakdown(&self) -> &B {
        &self.breakdown
    }

    /// `true` when `total` matches the period counts (always the case for
    /// buckets built with [`new`](Self::new); checked after deserializing).
    pub fn is_consistent(&self) -> bool {
        self.code_complete_period
            .checked_add(self.after_code_complete_period)
            .is_some_and(|sum| sum == self.total)
    }
}

/// Holiday deduction with the contributing occurrences.
pub type HolidayBucket = DeductionBucket<PeriodSplit<HolidayOccurrence>>;

/// Hackathon deduction with the contributing days.
pub type HackathonBucket = DeductionBucket<PeriodSplit<HackathonOccurrence>>;

/// Vacation deduction with the split inputs.
pub type VacationBucket = DeductionBucket<VacationBreakdown>;

/// Monday–Friday counts before any deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDays {
    /// Execute Commit → GA.
    pub total: u32,
    /// Execute Commit → Soft Code Complete.
    pub code_complete_period: u32,
    /// Soft Code Complete → GA.
    pub after_code_complete_period: u32,
}

/// Days left after all deductions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    /// Available days before Soft Code Complete.
    pub days_available_to_code_complete: u32,
    /// Available days after Soft Code Complete.
    pub days_available_after_code_complete: u32,
    /// Sum of both periods.
    pub total_available_days: u32,
    /// Available share of the period working days, in percent.
    pub efficiency: f64,
}

/// Complete output of one availability calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    /// The milestones the result was computed from.
    pub dates: MilestoneDates,
    /// Working days before deductions.
    pub working_days: WorkingDays,
    /// Public and company holidays.
    pub holidays: HolidayBucket,
    /// Hackathon block.
    pub hackathon: HackathonBucket,
    /// Paid leave.
    pub vacation: VacationBucket,
    /// What is left.
    pub summary: AvailabilitySummary,
    /// Observations on the plan.
    pub insights: Vec<String>,
    /// Suggested actions.
    pub recommendations: Vec<String>,
}

impl AvailabilityResult {
    /// Check the arithmetic invariants of the record.
    pub fn is_consistent(&self) -> bool {
        let s = &self.summary;
        self.holidays.is_consistent()
            && self.hackathon.is_consistent()
            && self.vacation.is_consistent()
            && s.days_available_to_code_complete
                .checked_add(s.days_available_after_code_complete)
                .is_some_and(|sum| sum == s.total_available_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_total_is_sum() {
        let bucket = DeductionBucket::new(3, 4, ());
        assert_eq!(bucket.total(), 7);
        assert!(bucket.is_consistent());
    }

    #[test]
    fn tampered_bucket_is_inconsistent() {
        let json = r#"{"total":9,"code_complete_period":3,"after_code_complete_period":4,"breakdown":null}"#;
        let bucket: DeductionBucket<()> = serde_json::from_str(json).unwrap();
        assert!(!bucket.is_consistent());
    }

    #[test]
    fn period_split_iterates_in_order() {
        let split = PeriodSplit {
            code_complete_period: vec![1, 2],
            after_code_complete_period: vec![3],
        };
        assert_eq!(split.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }
}
