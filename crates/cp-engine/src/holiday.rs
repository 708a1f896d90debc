//! Holiday records and the holiday-source contract.
//!
//! The engine never decides on its own which days are public holidays; it
//! asks a [`HolidaySource`] one calendar year at a time.  A source that
//! cannot answer must return an error: an empty list means "no holidays",
//! never "lookup failed".

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cp_core::errors::{Error, Result};
use cp_time::Date;
use serde::{Deserialize, Serialize};

/// How a holiday's date is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HolidayKind {
    /// Same calendar date every year (possibly shifted to an observed day).
    Fixed,
    /// Computed from a rule such as "fourth Thursday of November".
    Floating,
    /// Company-specific block not supplied by the public source.
    Company,
}

impl FromStr for HolidayKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(HolidayKind::Fixed),
            "floating" => Ok(HolidayKind::Floating),
            "company" => Ok(HolidayKind::Company),
            other => Err(Error::InvalidArgument(format!("unknown holiday kind '{other}'"))),
        }
    }
}

impl TryFrom<String> for HolidayKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// One non-working day with its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayOccurrence {
    /// Display name, e.g. "Labor Day".
    pub name: String,
    /// The non-working date.
    pub date: Date,
    /// How the date was determined.
    pub kind: HolidayKind,
}

impl HolidayOccurrence {
    /// Create a new occurrence.
    pub fn new(name: impl Into<String>, date: Date, kind: HolidayKind) -> Self {
        Self {
            name: name.into(),
            date,
            kind,
        }
    }
}

/// Supplies the holidays of one calendar year for a region.
///
/// Implementations must be idempotent and free of side effects for a given
/// `(year, region)`; the resolver relies on this when it caches results.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Name used in log lines and error messages.
    fn name(&self) -> &str;

    /// All holidays whose date falls inside `year`.
    ///
    /// # Returns
    /// * `Ok(Vec<HolidayOccurrence>)` - possibly empty
    /// * `Err(Error::HolidaySource)` - the data could not be obtained
    async fn list_holidays(&self, year: u16, region: &str) -> Result<Vec<HolidayOccurrence>>;
}

#[async_trait]
impl<T: HolidaySource + ?Sized> HolidaySource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn list_holidays(&self, year: u16, region: &str) -> Result<Vec<HolidayOccurrence>> {
        (**self).list_holidays(year, region).await
    }
}

// ── Static table ──────────────────────────────────────────────────────────────

/// A holiday source backed by a fixed in-memory table.
///
/// Years that were never added resolve to an empty list.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidaySource {
    entries: HashMap<(String, u16), Vec<HolidayOccurrence>>,
}

impl StaticHolidaySource {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add holidays for `region`; each one is filed under the year of its date.
    pub fn with_holidays(
        mut self,
        region: &str,
        holidays: impl IntoIterator<Item = HolidayOccurrence>,
    ) -> Self {
        for holiday in holidays {
            self.entries
                .entry((region.to_ascii_uppercase(), holiday.date.year()))
                .or_default()
                .push(holiday);
        }
        self
    }
}

#[async_trait]
impl HolidaySource for StaticHolidaySource {
    fn name(&self) -> &str {
        "static table"
    }

    async fn list_holidays(&self, year: u16, region: &str) -> Result<Vec<HolidayOccurrence>> {
        Ok(self
            .entries
            .get(&(region.to_ascii_uppercase(), year))
            .cloned()
            .unwrap_or_default())
    }
}

// ── Timeout wrapper ───────────────────────────────────────────────────────────

/// Bounds every lookup of the wrapped source by a deadline.
///
/// An elapsed deadline becomes [`Error::HolidaySource`], so the calculation
/// fails instead of continuing with partial holiday data.
#[derive(Debug, Clone)]
pub struct TimeoutHolidaySource<S> {
    inner: S,
    timeout: Duration,
}

impl<S: HolidaySource> TimeoutHolidaySource<S> {
    /// Wrap `inner` with a per-lookup `timeout`.
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<S: HolidaySource> HolidaySource for TimeoutHolidaySource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn list_holidays(&self, year: u16, region: &str) -> Result<Vec<HolidayOccurrence>> {
        tokio::time::timeout(self.timeout, self.inner.list_holidays(year, region))
            .await
            .map_err(|_| Error::HolidaySource {
                region: region.to_string(),
                year,
                reason: format!(
                    "{} did not answer within {:?}",
                    self.inner.name(),
                    self.timeout
                ),
            })?
    }
}
