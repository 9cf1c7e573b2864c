//! Engine configuration
//!
//! Loaded from JSON with every field optional:
//!
//! ```json
//! {
//!   "first_year": 2000,
//!   "last_year": 2025,
//!   "lookback_years": 5,
//!   "window_policy": "require_full_window",
//!   "min_lifetime_deals": 4,
//!   "target_category": "venture capital",
//!   "region": "Europe",
//!   "specialization_threshold": "0.2",
//!   "parallel": true
//! }
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ssi_core::Year;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::{EngineError, Result};

/// Supported calendar years for the history range
const SUPPORTED_YEARS: RangeInclusive<Year> = 1900..=2200;

/// How to score years whose lookback window reaches before `first_year`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Only years with a complete N-year history are scored; the rest are unresolved
    #[default]
    RequireFullWindow,
    /// Score over whatever part of the window lies inside the history range
    PartialWindow,
}

/// Configuration for one specialization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// First year of history and of the fact table
    #[serde(default = "default_first_year")]
    pub first_year: Year,

    /// Last year of history and of the fact table
    #[serde(default = "default_last_year")]
    pub last_year: Year,

    /// Number of prior years in the lookback window (current year excluded)
    #[serde(default = "default_lookback_years")]
    pub lookback_years: u32,

    #[serde(default)]
    pub window_policy: WindowPolicy,

    /// Minimum lifetime round count for eligibility (inclusive)
    #[serde(default = "default_min_lifetime_deals")]
    pub min_lifetime_deals: usize,

    /// Category token an investor must carry
    #[serde(default = "default_target_category")]
    pub target_category: String,

    /// Region of the qualifying industry exposure
    #[serde(default = "default_region")]
    pub region: String,

    /// Ratio at or above which an investor counts as specialised
    #[serde(default = "default_specialization_threshold")]
    pub specialization_threshold: Decimal,

    /// Fan the per-investor aggregation out over the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_first_year() -> Year {
    2000
}

fn default_last_year() -> Year {
    2025
}

fn default_lookback_years() -> u32 {
    5
}

fn default_min_lifetime_deals() -> usize {
    4
}

fn default_target_category() -> String {
    "venture capital".to_string()
}

fn default_region() -> String {
    "Europe".to_string()
}

fn default_specialization_threshold() -> Decimal {
    dec!(0.2)
}

fn default_parallel() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            first_year: default_first_year(),
            last_year: default_last_year(),
            lookback_years: default_lookback_years(),
            window_policy: WindowPolicy::default(),
            min_lifetime_deals: default_min_lifetime_deals(),
            target_category: default_target_category(),
            region: default_region(),
            specialization_threshold: default_specialization_threshold(),
            parallel: default_parallel(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| EngineError::ConfigIo {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create with an explicit year range, other settings default
    pub fn with_years(first_year: Year, last_year: Year) -> Self {
        Self {
            first_year,
            last_year,
            ..Default::default()
        }
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    pub fn with_lookback_years(mut self, years: u32) -> Self {
        self.lookback_years = years;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for year in [self.first_year, self.last_year] {
            if !SUPPORTED_YEARS.contains(&year) {
                return Err(EngineError::InvalidConfig(format!(
                    "year {} outside supported range {}..={}",
                    year,
                    SUPPORTED_YEARS.start(),
                    SUPPORTED_YEARS.end()
                )));
            }
        }
        if self.first_year > self.last_year {
            return Err(EngineError::InvalidConfig(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        if self.lookback_years == 0 {
            return Err(EngineError::InvalidConfig(
                "lookback_years must be at least 1".to_string(),
            ));
        }
        let span = self.last_year - self.first_year + 1;
        if !i32::try_from(self.lookback_years).is_ok_and(|years| years <= span) {
            return Err(EngineError::InvalidConfig(format!(
                "lookback_years {} exceeds the {}-year history range",
                self.lookback_years, span
            )));
        }
        if self.specialization_threshold < Decimal::ZERO
            || self.specialization_threshold > Decimal::ONE
        {
            return Err(EngineError::InvalidConfig(format!(
                "specialization_threshold {} outside [0, 1]",
                self.specialization_threshold
            )));
        }
        if self.target_category.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "target_category is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fact table years (also the history range)
    pub fn years(&self) -> RangeInclusive<Year> {
        self.first_year..=self.last_year
    }
}
