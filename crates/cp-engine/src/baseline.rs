//! Frozen baselines keyed by release plan.
//!
//! Freezing stores an [`AvailabilityResult`] together with the dates it was
//! computed from.  While a plan is frozen, callers show the stored result
//! verbatim instead of recomputing; [`BaselineStore::view`] does exactly
//! that.
//!
//! ```text
//!             freeze                freeze (overwrite)
//!  Unfrozen ──────────▶ Frozen ◀──────────────┐
//!     ▲                   │  └─────────────────┘
//!     └───── unfreeze ────┘
//! ```

use cp_core::errors::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::AvailabilityEngine;
use crate::holiday::HolidaySource;
use crate::milestones::MilestoneDates;
use crate::result::AvailabilityResult;
use crate::store::KeyValueStore;

const KEY_PREFIX: &str = "baseline:";

/// A result pinned to the dates it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenBaseline {
    /// Release plan the baseline belongs to.
    pub release_plan_id: String,
    /// Dates the result was computed from.
    pub input_dates: MilestoneDates,
    /// The stored result.
    pub result: AvailabilityResult,
}

/// Freeze state of one release plan.
#[derive(Debug, Clone, PartialEq)]
pub enum BaselineState {
    /// No baseline stored.
    Unfrozen,
    /// A baseline is stored.
    Frozen(FrozenBaseline),
}

/// What a caller should display for a release plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanView {
    /// The stored baseline, unchanged.
    Frozen(FrozenBaseline),
    /// A fresh calculation.
    Live(AvailabilityResult),
}

impl PlanView {
    /// The result to display.
    pub fn result(&self) -> &AvailabilityResult {
        match self {
            PlanView::Frozen(baseline) => &baseline.result,
            PlanView::Live(result) => result,
        }
    }

    /// `true` for a stored baseline.
    pub fn is_frozen(&self) -> bool {
        matches!(self, PlanView::Frozen(_))
    }
}

/// Baselines serialized as JSON into a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct BaselineStore<K> {
    store: K,
}

impl<K: KeyValueStore> BaselineStore<K> {
    /// Wrap `store`.
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Store `result` as the baseline of `release_plan_id`, replacing any
    /// previous one.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for an empty id or when `result` was not
    /// computed from `input_dates`; [`Error::FreezeStore`] when the write
    /// fails, in which case the previous state is kept.
    pub async fn freeze(
        &self,
        release_plan_id: &str,
        input_dates: MilestoneDates,
        result: AvailabilityResult,
    ) -> Result<FrozenBaseline> {
        let key = key_for(release_plan_id)?;
        input_dates.validate()?;
        if result.dates != input_dates {
            return Err(Error::InvalidArgument(format!(
                "result for {} → {} → {} does not match input dates {} → {} → {}",
                result.dates.execute_commit,
                result.dates.soft_code_complete,
                result.dates.ga,
                input_dates.execute_commit,
                input_dates.soft_code_complete,
                input_dates.ga
            )));
        }
        let baseline = FrozenBaseline {
            release_plan_id: release_plan_id.to_string(),
            input_dates,
            result,
        };
        let bytes =
            serde_json::to_vec(&baseline).map_err(|e| Error::Serialization(e.to_string()))?;
        self.store.set(&key, bytes).await?;
        info!("froze baseline for release plan {release_plan_id}");
        Ok(baseline)
    }

    /// Remove the baseline of `release_plan_id`; succeeds when none exists.
    pub async fn unfreeze(&self, release_plan_id: &str) -> Result<()> {
        let key = key_for(release_plan_id)?;
        self.store.delete(&key).await?;
        info!("unfroze baseline for release plan {release_plan_id}");
        Ok(())
    }

    /// Whether `release_plan_id` has a baseline.
    pub async fn is_frozen(&self, release_plan_id: &str) -> Result<bool> {
        Ok(self.read(release_plan_id).await?.is_some())
    }

    /// The stored baseline, if any.
    ///
    /// # Errors
    /// [`Error::Serialization`] when the stored bytes are not a consistent
    /// baseline.
    pub async fn read(&self, release_plan_id: &str) -> Result<Option<FrozenBaseline>> {
        let key = key_for(release_plan_id)?;
        let Some(bytes) = self.store.get(&key).await? else {
            return Ok(None);
        };
        let baseline: FrozenBaseline =
            serde_json::from_slice(&bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        if !baseline.result.is_consistent() {
            return Err(Error::Serialization(format!(
                "stored baseline for {release_plan_id} has inconsistent totals"
            )));
        }
        Ok(Some(baseline))
    }

    /// Current state of `release_plan_id`.
    pub async fn state(&self, release_plan_id: &str) -> Result<BaselineState> {
        Ok(match self.read(release_plan_id).await? {
            Some(baseline) => BaselineState::Frozen(baseline),
            None => BaselineState::Unfrozen,
        })
    }

    /// The stored baseline when frozen; otherwise a fresh calculation of
    /// `dates` with `engine`.
    pub async fn view<S: HolidaySource>(
        &self,
        release_plan_id: &str,
        dates: &MilestoneDates,
        engine: &AvailabilityEngine<S>,
    ) -> Result<PlanView> {
        match self.state(release_plan_id).await? {
            BaselineState::Frozen(baseline) => {
                debug!("showing frozen baseline for {release_plan_id}");
                Ok(PlanView::Frozen(baseline))
            }
            BaselineState::Unfrozen => Ok(PlanView::Live(engine.calculate(dates).await?)),
        }
    }
}

fn key_for(release_plan_id: &str) -> Result<String> {
    if release_plan_id.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "release plan id must not be empty".into(),
        ));
    }
    Ok(format!("{KEY_PREFIX}{release_plan_id}"))
}
