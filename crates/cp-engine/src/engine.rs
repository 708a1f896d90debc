//! The availability engine.
//!
//! [`AvailabilityEngine::calculate`] turns a validated milestone triple into
//! an [`AvailabilityResult`]:
//!
//! 1. count Monday–Friday days of the whole cycle and of both sub-periods;
//! 2. resolve holidays and hackathon days inside each sub-period;
//! 3. allocate the paid-leave allowance proportionally;
//! 4. subtract, floor at zero, and derive efficiency and insight text.
//!
//! Both sub-periods include Soft Code Complete.  Deductions use the same
//! inclusive bounds, so a holiday on the boundary day offsets the working
//! day it adds to both periods.

use std::collections::BTreeSet;

use cp_core::errors::Result;
use cp_core::PlannerConfig;
use cp_time::Date;
use log::{debug, info};

use crate::hackathon::{hackathon_in_range, HackathonOccurrence};
use crate::holiday::{HolidayOccurrence, HolidaySource};
use crate::insights::{insights, recommendations, CapacitySignals};
use crate::milestones::{MilestoneDates, Span};
use crate::resolver::HolidayResolver;
use crate::result::{
    AvailabilityResult, AvailabilitySummary, DeductionBucket, PeriodSplit, WorkingDays,
};
use crate::us_federal::UsFederalHolidays;
use crate::vacation::allocate_vacation;

/// Capacity calculator bound to a holiday source and a configuration.
///
/// The engine holds no mutable state; one instance can serve any number of
/// calculations, concurrently if the source allows it.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    source: S,
    config: PlannerConfig,
}

impl AvailabilityEngine<UsFederalHolidays> {
    /// Engine over the built-in US federal calendar.
    pub fn us_federal(config: PlannerConfig) -> Self {
        Self::new(UsFederalHolidays, config)
    }
}

impl<S: HolidaySource> AvailabilityEngine<S> {
    /// Bind `source` and `config`.
    pub fn new(source: S, config: PlannerConfig) -> Self {
        Self { source, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The holiday source in use.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Compute availability for `dates`.
    ///
    /// # Errors
    /// * [`Error::MilestoneOrder`](cp_core::Error::MilestoneOrder) when the
    ///   dates are not strictly increasing; nothing is looked up.
    /// * [`Error::HolidaySource`](cp_core::Error::HolidaySource) when the
    ///   holiday source fails for any year of the cycle.
    pub async fn calculate(&self, dates: &MilestoneDates) -> Result<AvailabilityResult> {
        dates.validate()?;
        let signals = CapacitySignals::for_dates(dates);

        let cycle = dates.cycle();
        let before = dates.code_complete_period();
        let after = dates.after_code_complete_period();
        let working_days = WorkingDays {
            total: cycle.working_days(),
            code_complete_period: before.working_days(),
            after_code_complete_period: after.working_days(),
        };

        // One resolver per call; the earlier period is resolved first.
        let mut resolver = HolidayResolver::new(
            &self.source,
            &self.config.holiday_region,
            &self.config.company_blocks,
        );
        let holidays = PeriodSplit {
            code_complete_period: resolver.holidays_in_range(before.start, before.end).await?,
            after_code_complete_period: resolver.holidays_in_range(after.start, after.end).await?,
        };
        debug!(
            "resolved {} holiday occurrences with {} source lookups",
            holidays.iter().count(),
            resolver.fetch_count()
        );
        let hackathon = PeriodSplit {
            code_complete_period: hackathon_in_range(before.start, before.end)?,
            after_code_complete_period: hackathon_in_range(after.start, after.end)?,
        };

        let holiday_days = |list: &[HolidayOccurrence]| {
            weekday_dates(list.iter().map(|h| h.date)).len() as u32
        };
        let hackathon_days = |days: &[HackathonOccurrence], holidays: &[HolidayOccurrence]| {
            let taken = weekday_dates(holidays.iter().map(|h| h.date));
            weekday_dates(days.iter().map(|h| h.date))
                .difference(&taken)
                .count() as u32
        };
        let hackathon_bucket = DeductionBucket::new(
            hackathon_days(&hackathon.code_complete_period, &holidays.code_complete_period),
            hackathon_days(
                &hackathon.after_code_complete_period,
                &holidays.after_code_complete_period,
            ),
            hackathon,
        );
        let holiday_bucket = DeductionBucket::new(
            holiday_days(&holidays.code_complete_period),
            holiday_days(&holidays.after_code_complete_period),
            holidays,
        );

        let vacation = allocate_vacation(dates, &self.config);
        let vacation_bucket = DeductionBucket::new(
            vacation.code_complete_period,
            vacation.after_code_complete_period,
            vacation.breakdown,
        );

        let available = |working: u32, deductions: [u32; 3]| {
            deductions
                .iter()
                .fold(working, |left, d| left.saturating_sub(*d))
        };
        let to_code_complete = available(
            working_days.code_complete_period,
            [
                holiday_bucket.code_complete_period(),
                hackathon_bucket.code_complete_period(),
                vacation_bucket.code_complete_period(),
            ],
        );
        let after_code_complete = available(
            working_days.after_code_complete_period,
            [
                holiday_bucket.after_code_complete_period(),
                hackathon_bucket.after_code_complete_period(),
                vacation_bucket.after_code_complete_period(),
            ],
        );
        let total_available = to_code_complete + after_code_complete;
        let summary = AvailabilitySummary {
            days_available_to_code_complete: to_code_complete,
            days_available_after_code_complete: after_code_complete,
            total_available_days: total_available,
            efficiency: efficiency(
                total_available,
                working_days.code_complete_period + working_days.after_code_complete_period,
            ),
        };

        let signals = CapacitySignals {
            efficiency: summary.efficiency,
            holiday_days: holiday_bucket.total(),
            hackathon_days: hackathon_bucket.total(),
            vacation_days: vacation_bucket.total(),
            ..signals
        };

        info!(
            "capacity {} → {} → {}: {} of {} working days available ({:.1}%)",
            dates.execute_commit,
            dates.soft_code_complete,
            dates.ga,
            total_available,
            working_days.total,
            summary.efficiency
        );

        Ok(AvailabilityResult {
            dates: *dates,
            working_days,
            holidays: holiday_bucket,
            hackathon: hackathon_bucket,
            vacation: vacation_bucket,
            summary,
            insights: insights(&signals),
            recommendations: recommendations(&signals),
        })
    }

    /// Working days of `span` minus its holidays, for ad-hoc queries.
    pub async fn net_working_days(&self, span: Span) -> Result<u32> {
        let mut resolver = HolidayResolver::new(
            &self.source,
            &self.config.holiday_region,
            &self.config.company_blocks,
        );
        let holidays = resolver.holidays_in_range(span.start, span.end).await?;
        let off = weekday_dates(holidays.iter().map(|h| h.date)).len() as u32;
        Ok(span.working_days().saturating_sub(off))
    }
}

/// Distinct Monday–Friday dates.
fn weekday_dates(dates: impl Iterator<Item = Date>) -> BTreeSet<Date> {
    dates.filter(|d| d.weekday().is_working_day()).collect()
}

/// `available / working * 100`, or 0 when there are no working days.
fn efficiency(available: u32, working: u32) -> f64 {
    if working == 0 {
        0.0
    } else {
        f64::from(available) / f64::from(working) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::{HolidayKind, StaticHolidaySource};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn no_blocks() -> PlannerConfig {
        PlannerConfig {
            company_blocks: Vec::new(),
            ..PlannerConfig::default()
        }
    }

    #[test]
    fn efficiency_guards_zero() {
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(efficiency(45, 90), 50.0);
    }

    #[tokio::test]
    async fn weekend_holidays_are_not_deducted() {
        // 2024-07-06 is a Saturday.
        let source = StaticHolidaySource::new().with_holidays(
            "US",
            [
                HolidayOccurrence::new("Weekday", date(2024, 7, 3), HolidayKind::Fixed),
                HolidayOccurrence::new("Weekend", date(2024, 7, 6), HolidayKind::Fixed),
            ],
        );
        let engine = AvailabilityEngine::new(source, no_blocks());
        let dates = MilestoneDates::new(date(2024, 7, 1), date(2024, 7, 15), date(2024, 8, 1));
        let result = engine.calculate(&dates).await.unwrap();
        assert_eq!(result.holidays.code_complete_period(), 1);
        assert_eq!(result.holidays.breakdown().code_complete_period.len(), 2);
    }

    #[tokio::test]
    async fn two_names_on_one_date_count_once() {
        let source = StaticHolidaySource::new().with_holidays(
            "US",
            [
                HolidayOccurrence::new("A", date(2024, 7, 3), HolidayKind::Fixed),
                HolidayOccurrence::new("B", date(2024, 7, 3), HolidayKind::Company),
            ],
        );
        let engine = AvailabilityEngine::new(source, no_blocks());
        let dates = MilestoneDates::new(date(2024, 7, 1), date(2024, 7, 15), date(2024, 8, 1));
        let result = engine.calculate(&dates).await.unwrap();
        assert_eq!(result.holidays.total(), 1);
    }

    #[tokio::test]
    async fn hackathon_on_a_holiday_is_not_double_counted() {
        let source = StaticHolidaySource::new().with_holidays(
            "US",
            [HolidayOccurrence::new("Closure", date(2024, 2, 7), HolidayKind::Company)],
        );
        let engine = AvailabilityEngine::new(source, no_blocks());
        let dates = MilestoneDates::new(date(2024, 1, 15), date(2024, 3, 1), date(2024, 4, 1));
        let result = engine.calculate(&dates).await.unwrap();
        assert_eq!(result.holidays.code_complete_period(), 1);
        assert_eq!(result.hackathon.code_complete_period(), 2);
        assert_eq!(result.hackathon.breakdown().code_complete_period.len(), 3);
        assert!(result.insights.iter().any(|s| s.contains("hackathon")));
    }

    #[tokio::test]
    async fn available_days_never_go_negative() {
        let config = PlannerConfig {
            annual_pto_days: 200,
            ..no_blocks()
        };
        let engine = AvailabilityEngine::new(StaticHolidaySource::new(), config);
        let dates = MilestoneDates::new(date(2024, 7, 1), date(2024, 7, 8), date(2024, 7, 15));
        let result = engine.calculate(&dates).await.unwrap();
        assert_eq!(result.summary.total_available_days, 0);
        assert_eq!(result.summary.efficiency, 0.0);
        assert!(result.is_consistent());
    }

    #[tokio::test]
    async fn net_working_days_subtracts_holidays() {
        let engine = AvailabilityEngine::us_federal(no_blocks());
        let span = Span::new(date(2024, 7, 1), date(2024, 7, 31));
        assert_eq!(engine.net_working_days(span).await.unwrap(), 22);
    }
}
