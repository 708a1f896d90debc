//! Planner configuration.
//!
//! [`PlannerConfig`] carries every caller-tunable constant the engine uses:
//! the paid-leave allowance, the holiday region, the backward-planning gaps
//! between milestones, and the company-specific blocks added on top of the
//! public holiday list.  It is an ordinary value passed to the engine at
//! construction time; there is no process-wide instance.
//!
//! Configuration is normally read from TOML:
//!
//! ```toml
//! annual_pto_days = 20
//! holiday_region = "US"
//!
//! [milestone_gaps]
//! soft_code_complete = 6
//!
//! [[company_blocks]]
//! name = "Year-End Slowdown"
//! start_month = 12
//! start_day = 24
//! end_month = 12
//! end_day = 31
//! ```
//!
//! Any omitted key keeps its default.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ensure;
use crate::errors::{Error, Result};
use crate::milestone::Milestone;

/// Default annual paid-leave allowance, in working days.
pub const DEFAULT_ANNUAL_PTO_DAYS: u32 = 18;

/// Default wellness days (informational, never deducted).
pub const DEFAULT_WELLNESS_DAYS: u32 = 3;

/// Default holiday region code.
pub const DEFAULT_HOLIDAY_REGION: &str = "US";

/// Default gap between consecutive milestones, in weeks.
pub const DEFAULT_MILESTONE_GAP_WEEKS: u32 = 4;

/// Environment variable overriding [`PlannerConfig::annual_pto_days`].
pub const ENV_PTO_DAYS: &str = "CAPACITY_PTO_DAYS";
/// Environment variable overriding [`PlannerConfig::wellness_days`].
pub const ENV_WELLNESS_DAYS: &str = "CAPACITY_WELLNESS_DAYS";
/// Environment variable overriding [`PlannerConfig::holiday_region`].
pub const ENV_HOLIDAY_REGION: &str = "CAPACITY_HOLIDAY_REGION";

/// All tunable inputs of the capacity calculation and the backward planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Annual paid-leave allowance split across a release cycle.
    pub annual_pto_days: u32,
    /// Wellness days; reported, never deducted separately.
    pub wellness_days: u32,
    /// Region code handed to the holiday source.
    pub holiday_region: String,
    /// Week gaps used by the backward milestone planner.
    pub milestone_gaps: MilestoneGaps,
    /// Company-wide non-working blocks not supplied by the holiday source.
    pub company_blocks: Vec<CompanyBlock>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            annual_pto_days: DEFAULT_ANNUAL_PTO_DAYS,
            wellness_days: DEFAULT_WELLNESS_DAYS,
            holiday_region: DEFAULT_HOLIDAY_REGION.to_string(),
            milestone_gaps: MilestoneGaps::default(),
            company_blocks: vec![CompanyBlock::year_end_slowdown()],
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PlannerConfig =
            toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        debug!("loaded planner configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Environment Variables
    /// - `CAPACITY_PTO_DAYS`: annual paid-leave allowance
    /// - `CAPACITY_WELLNESS_DAYS`: wellness days
    /// - `CAPACITY_HOLIDAY_REGION`: holiday region code
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_PTO_DAYS) {
            self.annual_pto_days = parse_days(ENV_PTO_DAYS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WELLNESS_DAYS) {
            self.wellness_days = parse_days(ENV_WELLNESS_DAYS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HOLIDAY_REGION) {
            self.holiday_region = raw.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.holiday_region.trim().is_empty() {
            return Err(Error::Config("holiday_region must not be empty".into()));
        }
        if self.annual_pto_days > 366 {
            return Err(Error::Config(format!(
                "annual_pto_days {} exceeds the days in a year",
                self.annual_pto_days
            )));
        }
        self.milestone_gaps
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        for block in &self.company_blocks {
            block.validate().map_err(|e| Error::Config(e.to_string()))?;
        }
        Ok(())
    }
}

fn parse_days(var: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{var} must be a non-negative integer, got '{raw}'")))
}

// ── Milestone gaps ────────────────────────────────────────────────────────────

/// Weeks between each milestone and the one that follows it.
///
/// Each field is named after the *earlier* milestone of its pair, so
/// `soft_code_complete` is the gap between Soft Code Complete and Commit Gate
/// Met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneGaps {
    /// Promotion Gate Met → GA.
    pub promotion_gate_met: u32,
    /// Commit Gate Met → Promotion Gate Met.
    pub commit_gate_met: u32,
    /// Soft Code Complete → Commit Gate Met.
    pub soft_code_complete: u32,
    /// Execute Commit → Soft Code Complete.
    pub execute_commit: u32,
    /// Concept Commit → Execute Commit.
    pub concept_commit: u32,
    /// Pre-CC Complete → Concept Commit.
    pub pre_cc_complete: u32,
}

impl Default for MilestoneGaps {
    fn default() -> Self {
        Self::uniform(DEFAULT_MILESTONE_GAP_WEEKS)
    }
}

impl MilestoneGaps {
    /// The same gap between every pair of milestones.
    pub fn uniform(weeks: u32) -> Self {
        Self {
            promotion_gate_met: weeks,
            commit_gate_met: weeks,
            soft_code_complete: weeks,
            execute_commit: weeks,
            concept_commit: weeks,
            pre_cc_complete: weeks,
        }
    }

    /// Weeks between `milestone` and its successor; `None` for GA.
    pub fn weeks_before_successor(&self, milestone: Milestone) -> Option<u32> {
        match milestone {
            Milestone::PromotionGateMet => Some(self.promotion_gate_met),
            Milestone::CommitGateMet => Some(self.commit_gate_met),
            Milestone::SoftCodeComplete => Some(self.soft_code_complete),
            Milestone::ExecuteCommit => Some(self.execute_commit),
            Milestone::ConceptCommit => Some(self.concept_commit),
            Milestone::PreCcComplete => Some(self.pre_cc_complete),
            Milestone::Ga => None,
        }
    }

    /// Every gap must be at least one week.
    pub fn validate(&self) -> Result<()> {
        for milestone in Milestone::ALL {
            if let Some(weeks) = self.weeks_before_successor(milestone) {
                ensure!(weeks > 0, "gap after {milestone} must be at least one week");
            }
        }
        Ok(())
    }
}

// ── Company blocks ────────────────────────────────────────────────────────────

/// A company-wide non-working window that recurs every calendar year, given
/// as an inclusive month/day range within one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBlock {
    /// Label attached to each generated occurrence.
    pub name: String,
    /// First month of the block (1–12).
    pub start_month: u8,
    /// First day of the block.
    pub start_day: u8,
    /// Last month of the block (1–12).
    pub end_month: u8,
    /// Last day of the block.
    pub end_day: u8,
}

impl CompanyBlock {
    /// December 26 through December 31.
    pub fn year_end_slowdown() -> Self {
        Self {
            name: "Year-End Slowdown".to_string(),
            start_month: 12,
            start_day: 26,
            end_month: 12,
            end_day: 31,
        }
    }

    /// Check month/day bounds and that the block does not wrap the year end.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "company block needs a name");
        for (month, day) in [
            (self.start_month, self.start_day),
            (self.end_month, self.end_day),
        ] {
            ensure!(
                (1..=12).contains(&month),
                "company block '{}': month {month} out of range [1, 12]",
                self.name
            );
            let max = MAX_DAYS_IN_MONTH[month as usize - 1];
            ensure!(
                (1..=max).contains(&day),
                "company block '{}': day {day} out of range [1, {max}] for month {month}",
                self.name
            );
        }
        ensure!(
            (self.start_month, self.start_day) <= (self.end_month, self.end_day),
            "company block '{}' must not wrap past December 31",
            self.name
        );
        Ok(())
    }
}

/// Upper bound of the day-of-month per month (February allows the 29th).
const MAX_DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
