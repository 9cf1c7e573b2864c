use std::collections::HashMap;

use ssi_core::{CompanyClassification, CompanyId, ExitKind, Round};
use ssi_ports::LedgerSnapshot;

/// Lookup of a company's industry classification
pub trait ClassificationLookup {
    fn classification(&self, company_id: CompanyId) -> Option<&CompanyClassification>;
}

impl ClassificationLookup for LedgerSnapshot {
    fn classification(&self, company_id: CompanyId) -> Option<&CompanyClassification> {
        LedgerSnapshot::classification(self, company_id)
    }
}

impl ClassificationLookup for HashMap<CompanyId, CompanyClassification> {
    fn classification(&self, company_id: CompanyId) -> Option<&CompanyClassification> {
        self.get(&company_id)
    }
}

/// Classification outcome for a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundClass {
    /// Target company is flagged as an industry company
    pub is_industry: bool,
    /// Round type is a terminal/liquidity event
    pub is_excluded_exit: bool,
    /// Target company had a classification entry
    pub classified: bool,
}

/// Tags rounds as industry-relevant and/or excluded exits
///
/// Pure function over its inputs. A missing classification is not an error:
/// the round is simply not an industry round.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundClassifier;

impl RoundClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, round: &Round, lookup: &impl ClassificationLookup) -> RoundClass {
        let classification = lookup.classification(round.company_id);
        RoundClass {
            is_industry: classification.is_some_and(|c| c.is_industry),
            is_excluded_exit: Self::is_exit(&round.round_type),
            classified: classification.is_some(),
        }
    }

    /// True iff the label is one of the fixed exit types
    pub fn is_exit(round_type: &str) -> bool {
        ExitKind::from_label(round_type).is_some()
    }

    /// True iff the round is a non-exit round into an industry company in `region`
    pub fn is_qualifying_exposure(
        &self,
        round: &Round,
        lookup: &impl ClassificationLookup,
        region: &str,
    ) -> bool {
        if Self::is_exit(&round.round_type) {
            return false;
        }
        lookup
            .classification(round.company_id)
            .is_some_and(|c| c.is_industry && c.in_region(region))
    }
}
