//! Error types for capacity-planner.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single `thiserror`-derived [`Error`] enum below.  The
//! categories a planner has to tell apart (bad milestone input, holiday data
//! unavailable, baseline persistence failure) each get their own variant so
//! that callers never mistake one for another.

use thiserror::Error;

use crate::milestone::Milestone;

/// The top-level error type used throughout capacity-planner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (see [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date construction or arithmetic error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two milestone dates are not in the required strictly increasing order.
    #[error(
        "milestone order violated: {earlier} ({earlier_date}) must fall before {later} ({later_date})"
    )]
    MilestoneOrder {
        /// The milestone that must come first.
        earlier: Milestone,
        /// The date supplied for `earlier`.
        earlier_date: String,
        /// The milestone that must come second.
        later: Milestone,
        /// The date supplied for `later`.
        later_date: String,
    },

    /// The holiday collaborator failed, timed out, or does not serve the
    /// requested region.  Never to be read as "no holidays".
    #[error("holiday data unavailable for region {region} year {year}: {reason}")]
    HolidaySource {
        /// Region code that was queried.
        region: String,
        /// Calendar year that was queried.
        year: u16,
        /// Underlying failure description.
        reason: String,
    },

    /// Baseline persistence failure on get / set / delete.
    #[error("baseline store failure for key '{key}': {reason}")]
    FreezeStore {
        /// Storage key involved.
        key: String,
        /// Underlying failure description.
        reason: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// `true` for milestone ordering failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MilestoneOrder { .. })
    }

    /// `true` when holiday data could not be obtained.
    pub fn is_holiday_source(&self) -> bool {
        matches!(self, Error::HolidaySource { .. })
    }

    /// `true` for persistence failures of the baseline store.
    pub fn is_freeze_store(&self) -> bool {
        matches!(self, Error::FreezeStore { .. })
    }
}

/// Shorthand `Result` type used throughout capacity-planner.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use cp_core::{ensure, errors::Error};
/// fn positive(weeks: u32) -> cp_core::errors::Result<u32> {
///     ensure!(weeks > 0, "gap must be at least one week, got {weeks}");
///     Ok(weeks)
/// }
/// assert!(positive(4).is_ok());
/// assert!(matches!(positive(0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use cp_core::{fail, errors::Error};
/// fn always_err() -> cp_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
