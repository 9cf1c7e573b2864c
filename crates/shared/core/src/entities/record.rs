use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::InvestorId;
use crate::values::{Ratio, Year};

/// One cell of the investor x year specialization fact table
///
/// Records are derived and always replaced wholesale for a given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecializationRecord {
    pub investor_id: InvestorId,
    pub year: Year,
    /// Share of window capital deployed in the industry, in [0, 1]
    pub ratio: Ratio,
}

impl SpecializationRecord {
    pub fn new(investor_id: InvestorId, year: Year, ratio: Ratio) -> Self {
        Self {
            investor_id,
            year,
            ratio,
        }
    }

    pub fn ratio_f64(&self) -> f64 {
        self.ratio.to_f64().unwrap_or(0.0)
    }
}
