//! Fact Table Builder
//!
//! Runs the whole pipeline over one ledger snapshot:
//!
//! ```text
//! rounds ──► RoundClassifier ──► drop exits / undated / out of range
//!                                        │
//! investors ──► EligibilityFilter ───────┤ keep eligible investors
//!                                        ▼
//!                      per investor (rayon fan-out):
//!                      YearlySeries ──► lookback windows ──► ratios
//!                                        │
//!                                        ▼ fan-in (BTreeMap by investor)
//!                               SpecializationFact
//! ```
//!
//! Each investor is an independent unit of work with no shared mutable state,
//! so the parallel and sequential paths yield identical tables.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use log::{debug, info};
use rayon::prelude::*;
use rust_decimal::Decimal;
use ssi_classify::RoundClassifier;
use ssi_core::{Amount, InvestorId, Ratio, Year};
use ssi_ports::LedgerSnapshot;

use crate::config::EngineConfig;
use crate::eligibility::{EligibilityFilter, EligibleInvestorSet};
use crate::error::Result;
use crate::fact::{FactRow, SpecializationFact};
use crate::stats::RunStats;
use crate::window::{WindowSums, WindowedAggregator, YearEntry, YearlySeries};

/// Output of one specialization run
#[derive(Debug, Clone)]
pub struct SpecializationRun {
    pub eligible: EligibleInvestorSet,
    pub fact: SpecializationFact,
    pub stats: RunStats,
}

/// Point-in-time industry share over an explicit year span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceShare {
    pub total: Amount,
    pub industry: Amount,
    pub share: Ratio,
    /// Share at or above the configured threshold with capital deployed
    pub specialised: bool,
}

/// Builds the investor x year specialization fact table
pub struct FactTableBuilder {
    config: EngineConfig,
    classifier: RoundClassifier,
    aggregator: WindowedAggregator,
}

impl FactTableBuilder {
    /// Create a builder; the configuration is validated up front
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let aggregator = WindowedAggregator::new(&config);
        Ok(Self {
            config,
            classifier: RoundClassifier::new(),
            aggregator,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the eligible set and the dense fact table
    pub fn build(&self, snapshot: &LedgerSnapshot) -> SpecializationRun {
        let mut stats = RunStats::default();
        let eligible = self.eligible_investors(snapshot, &mut stats);
        let entries = self.collect_entries(snapshot, &eligible, &mut stats);

        let windows = self.window_sums(&eligible, &entries);
        let rows = windows
            .into_iter()
            .map(|(id, windows)| (id, FactRow::from_windows(&windows)))
            .collect();
        let fact = SpecializationFact::new(self.config.first_year, self.config.last_year, rows);

        stats.log_summary();
        SpecializationRun {
            eligible,
            fact,
            stats,
        }
    }

    /// Window sums per eligible investor, one entry per configured year
    ///
    /// Investors with no aggregated rounds still get a dense row.
    pub fn window_sums(
        &self,
        eligible: &EligibleInvestorSet,
        entries: &BTreeMap<InvestorId, Vec<YearEntry>>,
    ) -> BTreeMap<InvestorId, Vec<Option<WindowSums>>> {
        let investors: Vec<InvestorId> = eligible.iter().copied().collect();
        let empty: Vec<YearEntry> = Vec::new();

        let compute = |id: &InvestorId| {
            let investor_entries = entries.get(id).unwrap_or(&empty);
            (*id, self.aggregator.windows(investor_entries))
        };

        if self.config.parallel {
            investors.par_iter().map(compute).collect()
        } else {
            investors.iter().map(compute).collect()
        }
    }

    /// Industry share per eligible investor over `years` (inclusive)
    ///
    /// Years outside the configured range contribute nothing.
    pub fn space_share(
        &self,
        snapshot: &LedgerSnapshot,
        years: RangeInclusive<Year>,
    ) -> BTreeMap<InvestorId, SpaceShare> {
        let mut stats = RunStats::default();
        let eligible = self.eligible_investors(snapshot, &mut stats);
        let entries = self.collect_entries(snapshot, &eligible, &mut stats);
        let threshold = self.config.specialization_threshold;

        eligible
            .iter()
            .map(|id| {
                let series = YearlySeries::from_entries(
                    self.config.first_year,
                    self.config.last_year,
                    entries.get(id).into_iter().flatten(),
                );
                let sums = series.sum_between(*years.start(), *years.end());
                let share = sums.ratio();
                (
                    *id,
                    SpaceShare {
                        total: sums.total,
                        industry: sums.industry,
                        share,
                        specialised: sums.total > Decimal::ZERO && share >= threshold,
                    },
                )
            })
            .collect()
    }

    fn eligible_investors(&self, snapshot: &LedgerSnapshot, stats: &mut RunStats) -> EligibleInvestorSet {
        let outcome = EligibilityFilter::new(&self.config).evaluate(snapshot);
        stats.investors_evaluated = outcome.evaluated;
        stats.investors_eligible = outcome.eligible.len();
        stats.failed_category = outcome.failed_category;
        stats.failed_activity = outcome.failed_activity;
        stats.failed_exposure = outcome.failed_exposure;
        info!(
            "Eligible investors: {} of {}",
            outcome.eligible.len(),
            outcome.evaluated
        );
        outcome.eligible
    }

    /// Classify rounds and keep the time-placed, non-exit rounds of eligible investors
    fn collect_entries(
        &self,
        snapshot: &LedgerSnapshot,
        eligible: &EligibleInvestorSet,
        stats: &mut RunStats,
    ) -> BTreeMap<InvestorId, Vec<YearEntry>> {
        let years = self.config.years();
        let mut entries: BTreeMap<InvestorId, Vec<YearEntry>> = BTreeMap::new();

        for round in &snapshot.rounds {
            stats.rounds_seen += 1;
            let class = self.classifier.classify(round, snapshot);
            if !class.classified {
                stats.unclassified += 1;
            }
            if class.is_excluded_exit {
                stats.exits_excluded += 1;
                continue;
            }
            if round.has_negative_amount() {
                stats.negative_amounts += 1;
            }

            let Some(year) = round.year() else {
                stats.undated += 1;
                debug!(
                    "Round of investor {} into company {} has no date, skipped",
                    round.investor_id, round.company_id
                );
                continue;
            };
            if !years.contains(&year) {
                stats.outside_range += 1;
                continue;
            }
            if !eligible.contains(&round.investor_id) {
                continue;
            }

            stats.rounds_aggregated += 1;
            entries.entry(round.investor_id).or_default().push(YearEntry::new(
                year,
                round.effective_amount(),
                class.is_industry,
            ));
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use ssi_core::{CompanyClassification, Investor, Round};

    fn date(year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, 3, 15)
    }

    fn snapshot() -> LedgerSnapshot {
        let investors = vec![
            Investor::new(1u64, "venture capital", "Italy"),
            Investor::new(2u64, "angel", "Italy"),
        ];
        let mut rounds = vec![
            Round::new(1u64, 100u64, Some(dec!(10000000)), date(2012), "SEED"),
            Round::new(1u64, 200u64, Some(dec!(30000000)), date(2013), "SERIES A"),
            Round::new(1u64, 200u64, Some(dec!(5000000)), date(2014), "SERIES B"),
            Round::new(1u64, 200u64, None, None, "SERIES C"),
            Round::new(1u64, 100u64, Some(dec!(99000000)), date(2013), "ACQUISITION"),
            Round::new(1u64, 300u64, Some(dec!(7)), date(1995), "SEED"),
        ];
        rounds.extend((0..4).map(|_| Round::new(2u64, 100u64, Some(dec!(1)), date(2012), "SEED")));

        LedgerSnapshot::new(
            investors,
            rounds,
            vec![
                CompanyClassification::new(100u64, true, "Europe"),
                CompanyClassification::new(200u64, false, "Europe"),
            ],
        )
    }

    #[test]
    fn test_build_scenario() {
        let builder = FactTableBuilder::new(EngineConfig::default()).unwrap();
        let run = builder.build(&snapshot());

        assert_eq!(run.eligible.iter().copied().collect::<Vec<_>>(), vec![InvestorId(1)]);
        assert_eq!(run.fact.len(), 1);
        assert_eq!(run.fact.records().count(), 26);
        assert_eq!(run.fact.ratio(InvestorId(1), 2014), Some(dec!(0.25)));
        assert_eq!(run.fact.ratio(InvestorId(2), 2014), None);
    }

    #[test]
    fn test_build_stats() {
        let builder = FactTableBuilder::new(EngineConfig::default()).unwrap();
        let run = builder.build(&snapshot());

        assert_eq!(run.stats.rounds_seen, 10);
        assert_eq!(run.stats.exits_excluded, 1);
        assert_eq!(run.stats.undated, 1);
        assert_eq!(run.stats.outside_range, 1);
        assert_eq!(run.stats.unclassified, 1);
        assert_eq!(run.stats.rounds_aggregated, 3);
        assert_eq!(run.stats.investors_eligible, 1);
        assert_eq!(run.stats.failed_category, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let snapshot = snapshot();
        let parallel = FactTableBuilder::new(EngineConfig::default()).unwrap().build(&snapshot);
        let sequential = FactTableBuilder::new(EngineConfig::default().sequential())
            .unwrap()
            .build(&snapshot);

        assert_eq!(parallel.fact, sequential.fact);
        assert_eq!(parallel.eligible, sequential.eligible);
    }

    #[test]
    fn test_space_share() {
        let builder = FactTableBuilder::new(EngineConfig::default()).unwrap();

        let shares = builder.space_share(&snapshot(), 2012..=2014);
        let share = shares[&InvestorId(1)];
        assert_eq!(share.total, dec!(45000000));
        assert_eq!(share.industry, dec!(10000000));
        assert!(share.share > dec!(0.2222) && share.share < dec!(0.2223));
        assert!(share.specialised);

        let shares = builder.space_share(&snapshot(), 2013..=2014);
        assert!(!shares[&InvestorId(1)].specialised);

        let shares = builder.space_share(&snapshot(), 2020..=2025);
        assert_eq!(shares[&InvestorId(1)].share, Decimal::ZERO);
        assert!(!shares[&InvestorId(1)].specialised);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_lookback_years(0);
        assert!(FactTableBuilder::new(config).is_err());
    }
}
