//! Holiday resolution for a date range.
//!
//! A [`HolidayResolver`] lives for one engine invocation.  It asks the
//! holiday source for each calendar year at most once, adds the configured
//! company blocks for that year, and answers range queries from the cached
//! year lists.

use std::collections::HashMap;

use cp_core::errors::{Error, Result};
use cp_core::CompanyBlock;
use cp_time::date::days_in_month;
use cp_time::Date;
use log::{debug, warn};

use crate::holiday::{HolidayKind, HolidayOccurrence, HolidaySource};

/// Range queries over a holiday source plus company blocks.
pub struct HolidayResolver<'a, S: HolidaySource + ?Sized> {
    source: &'a S,
    region: &'a str,
    company_blocks: &'a [CompanyBlock],
    cache: HashMap<u16, Vec<HolidayOccurrence>>,
    fetches: usize,
}

impl<'a, S: HolidaySource + ?Sized> HolidayResolver<'a, S> {
    /// A resolver with an empty cache.
    pub fn new(source: &'a S, region: &'a str, company_blocks: &'a [CompanyBlock]) -> Self {
        Self {
            source,
            region,
            company_blocks,
            cache: HashMap::new(),
            fetches: 0,
        }
    }

    /// Number of lookups sent to the source so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Holidays with a date in `[start, end]`, deduplicated by `(date, name)`
    /// and sorted by date, then name.
    ///
    /// # Errors
    /// Any failure of the source is returned as [`Error::HolidaySource`];
    /// no partial list is ever produced.
    pub async fn holidays_in_range(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<HolidayOccurrence>> {
        if start > end {
            return Ok(Vec::new());
        }
        let mut found = Vec::new();
        for year in start.year()..=end.year() {
            let holidays = self.year(year).await?;
            found.extend(
                holidays
                    .iter()
                    .filter(|h| start <= h.date && h.date <= end)
                    .cloned(),
            );
        }
        found.sort_by(|a, b| (a.date, &a.name).cmp(&(b.date, &b.name)));
        found.dedup_by(|a, b| a.date == b.date && a.name == b.name);
        Ok(found)
    }

    async fn year(&mut self, year: u16) -> Result<&[HolidayOccurrence]> {
        if !self.cache.contains_key(&year) {
            debug!(
                "fetching {} holidays for {year} from {}",
                self.region,
                self.source.name()
            );
            self.fetches += 1;
            let mut holidays = self
                .source
                .list_holidays(year, self.region)
                .await
                .map_err(|e| {
                    warn!("holiday lookup for {} {year} failed: {e}", self.region);
                    match e {
                        Error::HolidaySource { .. } => e,
                        other => Error::HolidaySource {
                            region: self.region.to_string(),
                            year,
                            reason: other.to_string(),
                        },
                    }
                })?;
            for block in self.company_blocks {
                holidays.extend(company_block_occurrences(block, year)?);
            }
            self.cache.insert(year, holidays);
        } else {
            debug!("holiday cache hit for {} {year}", self.region);
        }
        Ok(self.cache.get(&year).map(Vec::as_slice).unwrap_or_default())
    }
}

/// Expand a company block into one occurrence per day of `year`.
///
/// Month/day pairs that do not exist in `year` (February 29 of a common
/// year) are clamped to the end of the month.
pub fn company_block_occurrences(block: &CompanyBlock, year: u16) -> Result<Vec<HolidayOccurrence>> {
    let clamp = |month: u8, day: u8| Date::from_ymd(year, month, day.min(days_in_month(year, month)));
    let first = clamp(block.start_month, block.start_day)?;
    let last = clamp(block.end_month, block.end_day)?;
    Ok(first
        .range_to(last)
        .map(|date| HolidayOccurrence::new(block.name.clone(), date, HolidayKind::Company))
        .collect())
}
