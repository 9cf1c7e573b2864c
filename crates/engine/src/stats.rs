//! Run statistics and data-quality counters

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Counters collected while building the fact table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub investors_evaluated: usize,
    pub investors_eligible: usize,
    pub failed_category: usize,
    pub failed_activity: usize,
    pub failed_exposure: usize,

    pub rounds_seen: usize,
    /// Exit-type rounds removed before aggregation
    pub exits_excluded: usize,
    /// Non-exit rounds without a parseable date
    pub undated: usize,
    /// Dated non-exit rounds outside the configured year range
    pub outside_range: usize,
    /// Rounds whose target company has no classification
    pub unclassified: usize,
    /// Rounds with a negative amount (counted as zero)
    pub negative_amounts: usize,
    /// Rounds that reached the windowed aggregation
    pub rounds_aggregated: usize,
}

impl RunStats {
    /// Emit the run summary; data-quality issues are logged as warnings
    pub fn log_summary(&self) {
        info!(
            "Specialization run: investors={}, eligible={}, rounds={}, aggregated={}, exits_excluded={}",
            self.investors_evaluated,
            self.investors_eligible,
            self.rounds_seen,
            self.rounds_aggregated,
            self.exits_excluded
        );

        if self.undated > 0 {
            warn!("{} rounds have no parseable date and were not aggregated", self.undated);
        }
        if self.unclassified > 0 {
            warn!(
                "{} rounds target companies without classification (treated as non-industry)",
                self.unclassified
            );
        }
        if self.negative_amounts > 0 {
            warn!("{} rounds have negative amounts (treated as zero)", self.negative_amounts);
        }
    }
}
