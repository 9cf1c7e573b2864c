//! Fact Table
//!
//! Dense investor x year matrix of specialization ratios. Every eligible
//! investor has one cell per configured year; cells whose window could not be
//! resolved hold ratio 0 and are marked unresolved. The table is rebuilt
//! wholesale on every run.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use ssi_classify::classify_band;
use ssi_core::{Band, InvestorId, Ratio, SpecializationRecord, Year};

use crate::window::WindowSums;

/// One investor's ratios, `first_year` first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    ratios: Vec<Ratio>,
    resolved: Vec<bool>,
}

impl FactRow {
    pub fn from_windows(windows: &[Option<WindowSums>]) -> Self {
        Self {
            ratios: windows
                .iter()
                .map(|w| w.map(|sums| sums.ratio()).unwrap_or(Decimal::ZERO))
                .collect(),
            resolved: windows.iter().map(Option::is_some).collect(),
        }
    }

    pub fn ratios(&self) -> &[Ratio] {
        &self.ratios
    }

    pub fn resolved(&self) -> &[bool] {
        &self.resolved
    }
}

/// Materialized specialization ratios for every eligible investor and year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationFact {
    first_year: Year,
    last_year: Year,
    rows: BTreeMap<InvestorId, FactRow>,
}

impl SpecializationFact {
    pub fn new(first_year: Year, last_year: Year, rows: BTreeMap<InvestorId, FactRow>) -> Self {
        Self {
            first_year,
            last_year,
            rows,
        }
    }

    pub fn years(&self) -> RangeInclusive<Year> {
        self.first_year..=self.last_year
    }

    /// Number of investors (rows)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn investors(&self) -> impl Iterator<Item = InvestorId> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, investor_id: InvestorId) -> Option<&FactRow> {
        self.rows.get(&investor_id)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = (InvestorId, &FactRow)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub(crate) fn year_index(&self, year: Year) -> Option<usize> {
        self.years()
            .contains(&year)
            .then(|| (year - self.first_year) as usize)
    }

    /// Ratio for one cell; `None` if the investor or year is not in the table
    pub fn ratio(&self, investor_id: InvestorId, year: Year) -> Option<Ratio> {
        let idx = self.year_index(year)?;
        self.rows.get(&investor_id).map(|row| row.ratios[idx])
    }

    /// True if the cell's lookback window was resolved under the window policy
    pub fn is_resolved(&self, investor_id: InvestorId, year: Year) -> bool {
        match self.year_index(year) {
            Some(idx) => self
                .rows
                .get(&investor_id)
                .is_some_and(|row| row.resolved[idx]),
            None => false,
        }
    }

    pub fn band(&self, investor_id: InvestorId, year: Year) -> Option<Band> {
        self.ratio(investor_id, year).map(classify_band)
    }

    /// All cells, ordered by investor then year
    pub fn records(&self) -> impl Iterator<Item = SpecializationRecord> + '_ {
        self.rows.iter().flat_map(move |(id, row)| {
            row.ratios
                .iter()
                .enumerate()
                .map(move |(i, ratio)| {
                    SpecializationRecord::new(*id, self.first_year + i as Year, *ratio)
                })
        })
    }

    /// Band of every cell, ordered by investor then year
    pub fn bands(&self) -> impl Iterator<Item = (InvestorId, Year, Band)> + '_ {
        self.records()
            .map(|record| (record.investor_id, record.year, classify_band(record.ratio)))
    }
}
