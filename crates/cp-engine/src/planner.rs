//! Backward milestone planner.
//!
//! Starting from GA, each predecessor is placed a configured number of weeks
//! before its successor.  The walk follows [`CHAIN`], an explicit list of
//! links that each name a milestone, its successor, and the gap field that
//! separates them.  A link is placed against its own successor's date, so
//! the list must name every successor before using it.

use cp_core::errors::{Error, Result};
use cp_core::fail;
use cp_core::{Milestone, MilestoneGaps};
use cp_time::{Date, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::milestones::MilestoneDates;

/// One step of the backward walk.
#[derive(Debug, Clone, Copy)]
pub struct ChainLink {
    /// The milestone being placed.
    pub milestone: Milestone,
    /// The milestone it is measured back from.
    pub successor: Milestone,
    /// Weeks between the two.
    pub gap: fn(&MilestoneGaps) -> u32,
}

fn promotion_gate_met_gap(gaps: &MilestoneGaps) -> u32 {
    gaps.promotion_gate_met
}

fn commit_gate_met_gap(gaps: &MilestoneGaps) -> u32 {
    gaps.commit_gate_met
}

fn soft_code_complete_gap(gaps: &MilestoneGaps) -> u32 {
    gaps.soft_code_complete
}

fn execute_commit_gap(gaps: &MilestoneGaps) -> u32 {
    gaps.execute_commit
}

fn concept_commit_gap(gaps: &MilestoneGaps) -> u32 {
    gaps.concept_commit
}

fn pre_cc_complete_gap(gaps: &MilestoneGaps) -> u32 {
    gaps.pre_cc_complete
}

/// Links walked from GA backward.
pub const CHAIN: [ChainLink; 6] = [
    ChainLink {
        milestone: Milestone::PromotionGateMet,
        successor: Milestone::Ga,
        gap: promotion_gate_met_gap,
    },
    ChainLink {
        milestone: Milestone::CommitGateMet,
        successor: Milestone::PromotionGateMet,
        gap: commit_gate_met_gap,
    },
    ChainLink {
        milestone: Milestone::SoftCodeComplete,
        successor: Milestone::CommitGateMet,
        gap: soft_code_complete_gap,
    },
    ChainLink {
        milestone: Milestone::ExecuteCommit,
        successor: Milestone::SoftCodeComplete,
        gap: execute_commit_gap,
    },
    ChainLink {
        milestone: Milestone::ConceptCommit,
        successor: Milestone::ExecuteCommit,
        gap: concept_commit_gap,
    },
    ChainLink {
        milestone: Milestone::PreCcComplete,
        successor: Milestone::ConceptCommit,
        gap: pre_cc_complete_gap,
    },
];

/// One derived milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMilestone {
    /// Which milestone.
    pub milestone: Milestone,
    /// Its date.
    pub date: Date,
    /// Gap to the successor, `None` for GA.
    pub weeks_before_successor: Option<u32>,
}

/// GA followed by its predecessors in [`CHAIN`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestonePlan {
    entries: Vec<PlannedMilestone>,
}

impl MilestonePlan {
    /// All entries, GA first.
    pub fn entries(&self) -> &[PlannedMilestone] {
        &self.entries
    }

    /// Date of `milestone`.
    pub fn date(&self, milestone: Milestone) -> Option<Date> {
        self.entries
            .iter()
            .find(|e| e.milestone == milestone)
            .map(|e| e.date)
    }

    /// The Execute Commit / Soft Code Complete / GA triple of this plan.
    pub fn milestone_dates(&self) -> Result<MilestoneDates> {
        let (Some(ec), Some(scc), Some(ga)) = (
            self.date(Milestone::ExecuteCommit),
            self.date(Milestone::SoftCodeComplete),
            self.date(Milestone::Ga),
        ) else {
            fail!("plan has no Execute Commit / Soft Code Complete / GA triple");
        };
        Ok(MilestoneDates::new(ec, scc, ga))
    }
}

/// Derive every milestone from `ga` by walking [`CHAIN`] backward.
///
/// # Errors
/// [`Error::Precondition`] for a zero gap, [`Error::Date`] when a derived
/// date falls outside the supported range, [`Error::Runtime`] when a link
/// comes before its successor's.
pub fn plan_backward(ga: Date, gaps: &MilestoneGaps) -> Result<MilestonePlan> {
    gaps.validate()?;
    let mut plan = MilestonePlan {
        entries: vec![PlannedMilestone {
            milestone: Milestone::Ga,
            date: ga,
            weeks_before_successor: None,
        }],
    };
    for link in CHAIN {
        let Some(successor) = plan.date(link.successor) else {
            fail!("{} is placed before its successor {}", link.milestone, link.successor);
        };
        let weeks = (link.gap)(gaps);
        let weeks_back = i32::try_from(weeks)
            .map_err(|_| Error::Date(format!("gap of {weeks} weeks is out of range")))?;
        let date = successor.advance(-weeks_back, TimeUnit::Weeks)?;
        plan.entries.push(PlannedMilestone {
            milestone: link.milestone,
            date,
            weeks_before_successor: Some(weeks),
        });
    }
    Ok(plan)
}
