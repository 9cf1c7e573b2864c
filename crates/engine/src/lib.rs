//! SSI Engine
//!
//! Classifies investors by how concentrated their financing activity is in
//! the space economy, using a rolling multi-year ratio of industry capital to
//! total capital deployed.
//!
//! - **Eligibility**: category match, minimum lifetime activity, regional exposure
//! - **Windowed Aggregation**: per investor, per year lookback sums via prefix sums
//! - **Specialization Index**: bounded ratio with a defined zero-denominator state
//! - **Fact Table**: dense investor x year ratio matrix, banded on demand
//! - **Analytics**: band distributions, specialised counts, quantiles
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────────┐
//! │ LedgerSource │──►│  LedgerSnapshot  │──►│  FactTableBuilder    │
//! │(collaborator)│   │ (read-only copy) │   │                      │
//! └──────────────┘   └──────────────────┘   │  EligibilityFilter   │
//!                                           │  WindowedAggregator  │
//!                                           │  specialization_ratio│
//!                                           └──────────┬───────────┘
//!                                                      │
//!                         ┌────────────────────────────┼───────────────┐
//!                         ▼                            ▼               ▼
//!                EligibleInvestorSet          SpecializationFact    RunStats
//!                                                      │
//!                                                      ▼
//!                                              Band (per cell)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ssi_engine::{EngineConfig, FactTableBuilder};
//!
//! let builder = FactTableBuilder::new(EngineConfig::default())?;
//! let run = builder.build(&snapshot);
//!
//! for record in run.fact.records() {
//!     println!("{} {} {}", record.investor_id, record.year, record.ratio);
//! }
//! ```

pub mod analytics;
pub mod builder;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod fact;
pub mod index;
pub mod stats;
pub mod window;

// Re-export main types
pub use builder::{FactTableBuilder, SpaceShare, SpecializationRun};
pub use config::{EngineConfig, WindowPolicy};
pub use eligibility::{EligibilityFilter, EligibilityOutcome, EligibleInvestorSet};
pub use error::{EngineError, Result};
pub use fact::{FactRow, SpecializationFact};
pub use index::specialization_ratio;
pub use stats::RunStats;
pub use window::{WindowSums, WindowedAggregator, YearEntry, YearlySeries};
