//! Ledger sources
//!
//! - [`InMemoryLedger`]: tables held in memory, with optional simulated outages
//! - [`JsonLedger`]: one JSON array file per table in a directory

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use log::debug;
use serde::de::DeserializeOwned;
use ssi_core::{CompanyClassification, Investor, Round};
use ssi_ports::{LedgerError, LedgerResult, LedgerSource, LedgerTable};

/// In-memory ledger
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    investors: Vec<Investor>,
    rounds: Vec<Round>,
    classifications: Vec<CompanyClassification>,
    unavailable: HashSet<LedgerTable>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_investors(mut self, investors: impl IntoIterator<Item = Investor>) -> Self {
        self.investors.extend(investors);
        self
    }

    pub fn with_rounds(mut self, rounds: impl IntoIterator<Item = Round>) -> Self {
        self.rounds.extend(rounds);
        self
    }

    pub fn with_classifications(
        mut self,
        classifications: impl IntoIterator<Item = CompanyClassification>,
    ) -> Self {
        self.classifications.extend(classifications);
        self
    }

    /// Make reads of `table` fail
    pub fn with_unavailable(mut self, table: LedgerTable) -> Self {
        self.unavailable.insert(table);
        self
    }

    fn read<T: Clone>(&self, table: LedgerTable, rows: &[T]) -> LedgerResult<Vec<T>> {
        if self.unavailable.contains(&table) {
            return Err(LedgerError::Unavailable {
                table,
                reason: "table marked unavailable".to_string(),
            });
        }
        Ok(rows.to_vec())
    }
}

impl LedgerSource for InMemoryLedger {
    fn investors(&self) -> LedgerResult<Vec<Investor>> {
        self.read(LedgerTable::Investors, &self.investors)
    }

    fn rounds(&self) -> LedgerResult<Vec<Round>> {
        self.read(LedgerTable::Rounds, &self.rounds)
    }

    fn classifications(&self) -> LedgerResult<Vec<CompanyClassification>> {
        self.read(LedgerTable::CompanyClassification, &self.classifications)
    }

    fn name(&self) -> &str {
        "InMemoryLedger"
    }
}

/// Ledger stored as `<dir>/<table>.json`, each file a JSON array of rows
///
/// File names follow [`LedgerTable::name`]: `investors.json`, `rounds.json`,
/// `updown.json`.
#[derive(Debug, Clone)]
pub struct JsonLedger {
    dir: PathBuf,
}

impl JsonLedger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, table: LedgerTable) -> PathBuf {
        self.dir.join(format!("{}.json", table.name()))
    }

    fn read<T: DeserializeOwned>(&self, table: LedgerTable) -> LedgerResult<Vec<T>> {
        let path = self.path(table);
        let unavailable = |reason: String| LedgerError::Unavailable { table, reason };

        let contents = fs::read_to_string(&path)
            .map_err(|e| unavailable(format!("{}: {}", path.display(), e)))?;
        let rows: Vec<T> = serde_json::from_str(&contents)
            .map_err(|e| unavailable(format!("{}: {}", path.display(), e)))?;

        debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

impl LedgerSource for JsonLedger {
    fn investors(&self) -> LedgerResult<Vec<Investor>> {
        self.read(LedgerTable::Investors)
    }

    fn rounds(&self) -> LedgerResult<Vec<Round>> {
        self.read(LedgerTable::Rounds)
    }

    fn classifications(&self) -> LedgerResult<Vec<CompanyClassification>> {
        self.read(LedgerTable::CompanyClassification)
    }

    fn name(&self) -> &str {
        "JsonLedger"
    }
}
