//! SSI Runner - Specialization Index Runs
//!
//! Wires a ledger source to the engine:
//!
//! - **Ledger Sources**: in-memory tables and JSON table files
//! - **Index Runner**: config validation, snapshot load, fact table build
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────┐
//! │  InMemoryLedger  │        │    JsonLedger    │
//! └────────┬─────────┘        └────────┬─────────┘
//!          └─────────────┬─────────────┘
//!                        │ LedgerSource
//!                        ▼
//!             ┌─────────────────────┐
//!             │     IndexRunner     │
//!             │  LedgerSnapshot     │
//!             │  FactTableBuilder   │
//!             └──────────┬──────────┘
//!                        ▼
//!               SpecializationRun
//! ```

pub mod ledger;
pub mod run;

// Re-export main types
pub use ledger::{InMemoryLedger, JsonLedger};
pub use run::IndexRunner;

pub use ssi_engine::{EngineConfig, SpecializationRun};
