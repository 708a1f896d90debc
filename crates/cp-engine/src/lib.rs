//! # cp-engine
//!
//! The capacity calculation engine.
//!
//! Given three release milestones (Execute Commit, Soft Code Complete, GA)
//! the [`AvailabilityEngine`] counts the working days of the two
//! sub-periods, subtracts holidays, the February hackathon block, and a
//! proportional share of the paid-leave allowance, and reports what is left
//! together with threshold-based insights.  The [`planner`] derives a full
//! milestone chain backward from a GA date, and the [`BaselineStore`] keeps
//! a frozen result per release plan so that it is shown verbatim instead of
//! being recomputed.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Frozen baselines keyed by release plan.
pub mod baseline;

/// The availability engine.
pub mod engine;

/// Company hackathon rule.
pub mod hackathon;

/// Holiday records and the holiday-source contract.
pub mod holiday;

/// Threshold-based insight and recommendation text.
pub mod insights;

/// Milestone date triple and its ordering rules.
pub mod milestones;

/// Backward milestone planner.
pub mod planner;

/// Per-invocation holiday resolution with year-level caching.
pub mod resolver;

/// Availability result records.
pub mod result;

/// Key-value substrates for the baseline store.
pub mod store;

/// Built-in United States federal holiday source.
pub mod us_federal;

/// Proportional vacation allocation.
pub mod vacation;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use baseline::{BaselineState, BaselineStore, FrozenBaseline, PlanView};
pub use engine::AvailabilityEngine;
pub use hackathon::{hackathon_dates_for_year, hackathon_in_range, HackathonOccurrence};
pub use holiday::{
    HolidayKind, HolidayOccurrence, HolidaySource, StaticHolidaySource, TimeoutHolidaySource,
};
pub use milestones::{MilestoneDates, Span};
pub use planner::{plan_backward, MilestonePlan, PlannedMilestone};
pub use resolver::HolidayResolver;
pub use result::{AvailabilityResult, AvailabilitySummary, DeductionBucket, PeriodSplit, WorkingDays};
pub use store::{FileStore, InMemoryStore, KeyValueStore};
pub use us_federal::UsFederalHolidays;
pub use vacation::{allocate_vacation, vacation_for_period, VacationAllocation, VacationBreakdown};
