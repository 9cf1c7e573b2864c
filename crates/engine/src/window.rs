//! Windowed Aggregator
//!
//! Per investor, non-exit rounds are bucketed by calendar year into a dense
//! series over the configured range. Prefix sums over that series give each
//! target year's lookback window in O(1), so a whole investor row costs
//! O(history + years) instead of rescanning history for every target year.
//!
//! ## Window
//!
//! For target year Y with lookback N the window is `[Y - N, Y - 1]`: the N
//! years immediately before Y, never Y itself.
//!
//! ```text
//!   year:     2009 2010 2011 2012 2013 | 2014
//!             └──────── window ───────┘  target
//! ```

use rust_decimal::Decimal;
use ssi_core::{Amount, Ratio, Year};

use crate::config::{EngineConfig, WindowPolicy};
use crate::index::specialization_ratio;

/// One non-exit round reduced to what the aggregation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearEntry {
    pub year: Year,
    pub amount: Amount,
    pub is_industry: bool,
}

impl YearEntry {
    pub fn new(year: Year, amount: Amount, is_industry: bool) -> Self {
        Self {
            year,
            amount,
            is_industry,
        }
    }
}

/// Capital sums over one lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSums {
    /// All non-exit capital deployed in the window
    pub total: Amount,
    /// Capital deployed into industry companies in the window
    pub industry: Amount,
}

impl WindowSums {
    pub fn new(total: Amount, industry: Amount) -> Self {
        Self { total, industry }
    }

    pub fn ratio(&self) -> Ratio {
        specialization_ratio(self.industry, self.total)
    }
}

/// Dense yearly totals for one investor with prefix sums
#[derive(Debug, Clone)]
pub struct YearlySeries {
    first_year: Year,
    /// prefix[i] = sum of years first_year .. first_year + i - 1
    prefix_total: Vec<Amount>,
    prefix_industry: Vec<Amount>,
}

impl YearlySeries {
    /// Build the series for `[first_year, last_year]`; entries outside are ignored
    pub fn from_entries<'a>(
        first_year: Year,
        last_year: Year,
        entries: impl IntoIterator<Item = &'a YearEntry>,
    ) -> Self {
        let len = usize::try_from(i64::from(last_year) - i64::from(first_year) + 1).unwrap_or(0);
        let mut totals = vec![Decimal::ZERO; len];
        let mut industry = vec![Decimal::ZERO; len];

        for entry in entries {
            if entry.year < first_year || entry.year > last_year {
                continue;
            }
            let idx = (entry.year - first_year) as usize;
            totals[idx] += entry.amount;
            if entry.is_industry {
                industry[idx] += entry.amount;
            }
        }

        Self {
            first_year,
            prefix_total: prefix_sums(&totals),
            prefix_industry: prefix_sums(&industry),
        }
    }

    pub fn first_year(&self) -> Year {
        self.first_year
    }

    pub fn last_year(&self) -> Year {
        self.first_year + self.len() as Year - 1
    }

    /// Number of years in the series
    pub fn len(&self) -> usize {
        self.prefix_total.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sums over `[from, to]` inclusive, clipped to the series range
    pub fn sum_between(&self, from: Year, to: Year) -> WindowSums {
        let from = from.max(self.first_year);
        let to = to.min(self.last_year());
        if from > to {
            return WindowSums::default();
        }

        let lo = (from - self.first_year) as usize;
        let hi = (to - self.first_year) as usize + 1;
        WindowSums {
            total: self.prefix_total[hi] - self.prefix_total[lo],
            industry: self.prefix_industry[hi] - self.prefix_industry[lo],
        }
    }

    /// Lookback window sums for `year`, or `None` when the policy leaves it unresolved
    pub fn window(&self, year: Year, lookback_years: u32, policy: WindowPolicy) -> Option<WindowSums> {
        let lookback = Year::try_from(lookback_years).unwrap_or(Year::MAX);
        let start = year.saturating_sub(lookback);
        let end = year.saturating_sub(1);

        match policy {
            WindowPolicy::RequireFullWindow if start < self.first_year => None,
            _ => Some(self.sum_between(start, end)),
        }
    }
}

fn prefix_sums(values: &[Amount]) -> Vec<Amount> {
    let mut prefix = Vec::with_capacity(values.len() + 1);
    let mut running = Decimal::ZERO;
    prefix.push(running);
    for value in values {
        running += *value;
        prefix.push(running);
    }
    prefix
}

/// Computes lookback window sums for every year of the configured range
#[derive(Debug, Clone)]
pub struct WindowedAggregator {
    first_year: Year,
    last_year: Year,
    lookback_years: u32,
    policy: WindowPolicy,
}

impl WindowedAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            first_year: config.first_year,
            last_year: config.last_year,
            lookback_years: config.lookback_years,
            policy: config.window_policy,
        }
    }

    pub fn series(&self, entries: &[YearEntry]) -> YearlySeries {
        YearlySeries::from_entries(self.first_year, self.last_year, entries)
    }

    /// Window sums for each target year, `first_year` first
    pub fn windows(&self, entries: &[YearEntry]) -> Vec<Option<WindowSums>> {
        let series = self.series(entries);
        (self.first_year..=self.last_year)
            .map(|year| series.window(year, self.lookback_years, self.policy))
            .collect()
    }
}
