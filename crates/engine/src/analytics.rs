//! Downstream analytics over a built fact table
//!
//! The reporting layer compares investors across specialization bands and
//! thresholds. These are the shared aggregates it relies on.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use ssi_classify::classify_band;
use ssi_core::{Band, InvestorId, Ratio, Year};

use crate::fact::SpecializationFact;

impl SpecializationFact {
    /// Investor count per band for one year; every band is present
    pub fn band_distribution(&self, year: Year) -> Option<BTreeMap<Band, usize>> {
        let idx = self.year_index(year)?;
        let mut distribution: BTreeMap<Band, usize> =
            Band::ALL.into_iter().map(|band| (band, 0)).collect();

        for (_, row) in self.rows() {
            *distribution.entry(classify_band(row.ratios()[idx])).or_insert(0) += 1;
        }
        Some(distribution)
    }

    /// Number of investors at or above `threshold`, per year
    pub fn specialised_count_by_year(&self, threshold: Ratio) -> BTreeMap<Year, usize> {
        self.years()
            .enumerate()
            .map(|(idx, year)| {
                let count = self
                    .rows()
                    .filter(|(_, row)| row.ratios()[idx] >= threshold)
                    .count();
                (year, count)
            })
            .collect()
    }

    /// True if the investor becomes specialised and never falls back below `threshold`
    pub fn is_persistently_specialised(&self, investor_id: InvestorId, threshold: Ratio) -> bool {
        let Some(row) = self.row(investor_id) else {
            return false;
        };

        let mut specialised = false;
        for ratio in row.ratios() {
            if *ratio >= threshold {
                specialised = true;
            } else if specialised {
                return false;
            }
        }
        specialised
    }

    /// Quantiles of one year's ratio distribution
    ///
    /// Linear interpolation between order statistics; each `q` is clamped to
    /// [0, 1]. `None` if the year is out of range or the table is empty.
    pub fn ratio_quantiles(&self, year: Year, quantiles: &[Decimal]) -> Option<Vec<Ratio>> {
        let idx = self.year_index(year)?;
        let mut sorted: Vec<Ratio> = self.rows().map(|(_, row)| row.ratios()[idx]).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort();

        let last = Decimal::from(sorted.len() - 1);
        let values = quantiles
            .iter()
            .map(|q| {
                let position = (*q).clamp(Decimal::ZERO, Decimal::ONE) * last;
                let lower = position.floor();
                let fraction = position - lower;
                let lo = lower.to_usize().unwrap_or(0);
                let hi = (lo + 1).min(sorted.len() - 1);
                sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
            })
            .collect();
        Some(values)
    }

    /// Investors whose ratio in `year` is at or above `threshold`, ordered by id
    pub fn cohort_at_or_above(&self, year: Year, threshold: Ratio) -> Vec<InvestorId> {
        let Some(idx) = self.year_index(year) else {
            return Vec::new();
        };
        self.rows()
            .filter(|(_, row)| row.ratios()[idx] >= threshold)
            .map(|(id, _)| id)
            .collect()
    }
}
