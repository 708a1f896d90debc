//! Release milestone identifiers.

use serde::{Deserialize, Serialize};

/// A named checkpoint in a release cycle, listed in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// Pre-Concept-Commit work complete.
    PreCcComplete,
    /// Concept Commit.
    ConceptCommit,
    /// Execute Commit: scope is committed.
    ExecuteCommit,
    /// Soft Code Complete: feature-complete, pre-stabilization.
    SoftCodeComplete,
    /// Commit Gate Met.
    CommitGateMet,
    /// Promotion Gate Met.
    PromotionGateMet,
    /// General Availability.
    Ga,
}

impl Milestone {
    /// All milestones, earliest first.
    pub const ALL: [Milestone; 7] = [
        Milestone::PreCcComplete,
        Milestone::ConceptCommit,
        Milestone::ExecuteCommit,
        Milestone::SoftCodeComplete,
        Milestone::CommitGateMet,
        Milestone::PromotionGateMet,
        Milestone::Ga,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Milestone::PreCcComplete => "Pre-CC Complete",
            Milestone::ConceptCommit => "Concept Commit",
            Milestone::ExecuteCommit => "Execute Commit",
            Milestone::SoftCodeComplete => "Soft Code Complete",
            Milestone::CommitGateMet => "Commit Gate Met",
            Milestone::PromotionGateMet => "Promotion Gate Met",
            Milestone::Ga => "GA",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
