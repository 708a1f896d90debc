//! The milestone date triple consumed by the availability engine.

use cp_core::errors::{Error, Result};
use cp_core::Milestone;
use cp_time::{calendar_days, working_days, Date};
use serde::{Deserialize, Serialize};

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First day.
    pub start: Date,
    /// Last day.
    pub end: Date,
}

impl Span {
    /// Create a span; no ordering check is made.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Monday–Friday count over the span, both ends included.
    pub fn working_days(&self) -> u32 {
        working_days(self.start, self.end)
    }

    /// `end − start` in calendar days, never negative.
    pub fn calendar_days(&self) -> u32 {
        calendar_days(self.start, self.end)
    }

    /// Whether `date` lies inside the span.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Execute Commit, Soft Code Complete, and GA of one release.
///
/// The three dates must be strictly increasing.  Construction does not
/// check this; [`validate`](Self::validate) does, and the engine calls it
/// before doing any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneDates {
    /// Execute Commit: start of the release cycle.
    pub execute_commit: Date,
    /// Soft Code Complete: splits the cycle into two sub-periods.
    pub soft_code_complete: Date,
    /// General Availability: end of the release cycle.
    pub ga: Date,
}

impl MilestoneDates {
    /// Bundle three dates.
    pub fn new(execute_commit: Date, soft_code_complete: Date, ga: Date) -> Self {
        Self {
            execute_commit,
            soft_code_complete,
            ga,
        }
    }

    /// Parse three ISO dates.
    pub fn parse(execute_commit: &str, soft_code_complete: &str, ga: &str) -> Result<Self> {
        Ok(Self::new(
            execute_commit.parse()?,
            soft_code_complete.parse()?,
            ga.parse()?,
        ))
    }

    /// Fail with [`Error::MilestoneOrder`] naming the first out-of-order pair.
    pub fn validate(&self) -> Result<()> {
        let pairs = [
            (
                Milestone::ExecuteCommit,
                self.execute_commit,
                Milestone::SoftCodeComplete,
                self.soft_code_complete,
            ),
            (
                Milestone::SoftCodeComplete,
                self.soft_code_complete,
                Milestone::Ga,
                self.ga,
            ),
        ];
        for (earlier, earlier_date, later, later_date) in pairs {
            if earlier_date >= later_date {
                return Err(Error::MilestoneOrder {
                    earlier,
                    earlier_date: earlier_date.to_string(),
                    later,
                    later_date: later_date.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The date of `milestone`, if it is one of the three.
    pub fn date(&self, milestone: Milestone) -> Option<Date> {
        match milestone {
            Milestone::ExecuteCommit => Some(self.execute_commit),
            Milestone::SoftCodeComplete => Some(self.soft_code_complete),
            Milestone::Ga => Some(self.ga),
            _ => None,
        }
    }

    /// Execute Commit → GA.
    pub fn cycle(&self) -> Span {
        Span::new(self.execute_commit, self.ga)
    }

    /// Execute Commit → Soft Code Complete.
    pub fn code_complete_period(&self) -> Span {
        Span::new(self.execute_commit, self.soft_code_complete)
    }

    /// Soft Code Complete → GA.
    pub fn after_code_complete_period(&self) -> Span {
        Span::new(self.soft_code_complete, self.ga)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_triple_is_valid() {
        let dates = MilestoneDates::parse("2024-07-01", "2024-09-01", "2024-11-01").unwrap();
        assert!(dates.validate().is_ok());
        assert_eq!(dates.cycle().calendar_days(), 123);
        assert_eq!(dates.code_complete_period().calendar_days(), 62);
        assert_eq!(dates.after_code_complete_period().calendar_days(), 61);
    }

    #[test]
    fn inverted_first_pair_is_named() {
        let dates = MilestoneDates::parse("2024-09-01", "2024-07-01", "2024-11-01").unwrap();
        match dates.validate() {
            Err(Error::MilestoneOrder { earlier, later, .. }) => {
                assert_eq!(earlier, Milestone::ExecuteCommit);
                assert_eq!(later, Milestone::SoftCodeComplete);
            }
            other => panic!("expected MilestoneOrder, got {other:?}"),
        }
    }

    #[test]
    fn equal_dates_are_rejected() {
        let dates = MilestoneDates::parse("2024-07-01", "2024-09-01", "2024-09-01").unwrap();
        match dates.validate() {
            Err(Error::MilestoneOrder { earlier, later, .. }) => {
                assert_eq!(earlier, Milestone::SoftCodeComplete);
                assert_eq!(later, Milestone::Ga);
            }
            other => panic!("expected MilestoneOrder, got {other:?}"),
        }
    }

    #[test]
    fn malformed_input_fails_to_parse() {
        assert!(MilestoneDates::parse("2024-07-01", "not a date", "2024-11-01").is_err());
    }

    #[test]
    fn date_lookup() {
        let dates = MilestoneDates::parse("2024-07-01", "2024-09-01", "2024-11-01").unwrap();
        assert_eq!(dates.date(Milestone::Ga), Some(dates.ga));
        assert_eq!(dates.date(Milestone::ConceptCommit), None);
    }
}
