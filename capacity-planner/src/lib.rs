//! # capacity-planner
//!
//! Working-day budgets for a release cycle.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than on the
//! individual `cp-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! capacity-planner = "0.1"
//! ```
//!
//! Derive a milestone plan backward from a GA date:
//!
//! ```rust
//! use capacity_planner::core::{Milestone, MilestoneGaps};
//! use capacity_planner::engine::plan_backward;
//! use capacity_planner::time::Date;
//!
//! let ga = Date::from_ymd(2025, 11, 11)?;
//! let plan = plan_backward(ga, &MilestoneGaps::default())?;
//! assert_eq!(plan.date(Milestone::ExecuteCommit), Some(Date::from_ymd(2025, 7, 22)?));
//! # Ok::<(), capacity_planner::core::Error>(())
//! ```
//!
//! Availability itself is computed asynchronously, because holiday data
//! may come from a remote service:
//!
//! ```rust,no_run
//! use capacity_planner::core::PlannerConfig;
//! use capacity_planner::engine::{AvailabilityEngine, MilestoneDates};
//!
//! # async fn run() -> capacity_planner::core::Result<()> {
//! let config = PlannerConfig::from_path("config/planner.toml")?.with_env_overrides()?;
//! let engine = AvailabilityEngine::us_federal(config);
//! let dates = MilestoneDates::parse("2024-07-01", "2024-09-01", "2024-11-01")?;
//! let result = engine.calculate(&dates).await?;
//! println!("{} days available", result.summary.total_available_days);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Errors, milestones, and configuration.
pub use cp_core as core;

/// Dates, weekdays, and working-day arithmetic.
pub use cp_time as time;

/// Holiday resolution, the availability engine, planning, and baselines.
pub use cp_engine as engine;
