//! Index run orchestration
//!
//! One run: validate config, load every ledger table, build the fact table.
//! A ledger failure aborts the run before any computation.

use std::time::Instant;

use log::{error, info};
use ssi_engine::{EngineConfig, FactTableBuilder, Result, SpecializationRun};
use ssi_ports::{LedgerSnapshot, LedgerSource};

/// Runs the specialization engine against a ledger source
pub struct IndexRunner {
    builder: FactTableBuilder,
}

impl IndexRunner {
    /// Create a runner; fails on invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            builder: FactTableBuilder::new(config)?,
        })
    }

    /// Create a runner from a JSON config file
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::new(EngineConfig::from_file(path)?)
    }

    pub fn config(&self) -> &EngineConfig {
        self.builder.config()
    }

    /// Load a snapshot from `source` and build the fact table
    pub fn run(&self, source: &dyn LedgerSource) -> Result<SpecializationRun> {
        let started = Instant::now();
        info!("Starting specialization run from {}", source.name());

        let snapshot = LedgerSnapshot::load(source)
            .inspect_err(|e| error!("Run aborted, ledger load failed: {}", e))?;
        let run = self.run_snapshot(&snapshot);

        info!(
            "Specialization run complete: investors={}, years={}..={}, elapsed={:?}",
            run.fact.len(),
            self.config().first_year,
            self.config().last_year,
            started.elapsed()
        );
        Ok(run)
    }

    /// Build from an already loaded snapshot
    pub fn run_snapshot(&self, snapshot: &LedgerSnapshot) -> SpecializationRun {
        self.builder.build(snapshot)
    }
}
