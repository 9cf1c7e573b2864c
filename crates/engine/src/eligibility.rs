//! Eligibility Filter
//!
//! An investor is scored only when all three criteria hold:
//!
//! 1. **Category**: its tags contain the target category token
//! 2. **Activity**: lifetime round count >= `min_lifetime_deals`
//! 3. **Exposure**: at least one non-exit round into an industry company
//!    located in the configured region
//!
//! Membership is all-or-nothing.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::debug;
use ssi_classify::RoundClassifier;
use ssi_core::InvestorId;
use ssi_ports::LedgerSnapshot;

use crate::config::EngineConfig;

/// Investors satisfying every eligibility criterion, ordered by id
pub type EligibleInvestorSet = BTreeSet<InvestorId>;

/// Result of evaluating eligibility over a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityOutcome {
    pub eligible: EligibleInvestorSet,
    /// Distinct investors evaluated
    pub evaluated: usize,
    /// Failure counts per criterion; one investor may fail several
    pub failed_category: usize,
    pub failed_activity: usize,
    pub failed_exposure: usize,
}

/// Determines which investors qualify for specialization scoring
pub struct EligibilityFilter<'a> {
    config: &'a EngineConfig,
    classifier: RoundClassifier,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            classifier: RoundClassifier::new(),
        }
    }

    /// Lifetime round counts over the whole ledger (exits and undated rounds included)
    pub fn lifetime_deal_counts(snapshot: &LedgerSnapshot) -> HashMap<InvestorId, usize> {
        let mut counts = HashMap::new();
        for round in &snapshot.rounds {
            *counts.entry(round.investor_id).or_insert(0) += 1;
        }
        counts
    }

    /// Investors with at least one qualifying regional industry round
    pub fn exposed_investors(&self, snapshot: &LedgerSnapshot) -> HashSet<InvestorId> {
        snapshot
            .rounds
            .iter()
            .filter(|round| {
                self.classifier
                    .is_qualifying_exposure(round, snapshot, &self.config.region)
            })
            .map(|round| round.investor_id)
            .collect()
    }

    pub fn evaluate(&self, snapshot: &LedgerSnapshot) -> EligibilityOutcome {
        let deal_counts = Self::lifetime_deal_counts(snapshot);
        let exposed = self.exposed_investors(snapshot);

        let mut outcome = EligibilityOutcome::default();
        let mut seen = HashSet::with_capacity(snapshot.investors.len());

        for investor in &snapshot.investors {
            if !seen.insert(investor.id) {
                continue;
            }
            outcome.evaluated += 1;

            if investor.types.is_empty() {
                debug!("Investor {} has no parseable category tags", investor.id);
            }
            let category_ok = investor.has_category(&self.config.target_category);
            let deals = deal_counts.get(&investor.id).copied().unwrap_or(0);
            let activity_ok = deals >= self.config.min_lifetime_deals;
            let exposure_ok = exposed.contains(&investor.id);

            if !category_ok {
                outcome.failed_category += 1;
            }
            if !activity_ok {
                outcome.failed_activity += 1;
            }
            if !exposure_ok {
                outcome.failed_exposure += 1;
            }

            if category_ok && activity_ok && exposure_ok {
                outcome.eligible.insert(investor.id);
            }
        }

        debug!(
            "Eligibility: evaluated={}, eligible={}, failed_category={}, failed_activity={}, failed_exposure={}",
            outcome.evaluated,
            outcome.eligible.len(),
            outcome.failed_category,
            outcome.failed_activity,
            outcome.failed_exposure
        );

        outcome
    }
}
