use std::collections::HashMap;
use std::str::FromStr;

use log::{debug, warn};
use ssi_core::{CompanyClassification, CompanyId, Investor, Round};

use crate::error::{LedgerError, LedgerResult};

/// Closed set of ledger tables the engine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerTable {
    Investors,
    Rounds,
    /// Industry and segment flags per company (stored as `updown`)
    CompanyClassification,
}

impl LedgerTable {
    pub const ALL: [LedgerTable; 3] = [
        LedgerTable::Investors,
        LedgerTable::Rounds,
        LedgerTable::CompanyClassification,
    ];

    /// Storage name of the table
    pub fn name(&self) -> &'static str {
        match self {
            LedgerTable::Investors => "investors",
            LedgerTable::Rounds => "rounds",
            LedgerTable::CompanyClassification => "updown",
        }
    }
}

impl std::fmt::Display for LedgerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LedgerTable {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|table| table.name() == key)
            .ok_or_else(|| LedgerError::UnknownTable(s.to_string()))
    }
}

/// Port for the investment ledger
///
/// Implemented by the storage collaborator. Each method returns a complete,
/// immutable copy of one table; a failure on any table aborts the run.
pub trait LedgerSource: Send + Sync {
    fn investors(&self) -> LedgerResult<Vec<Investor>>;

    fn rounds(&self) -> LedgerResult<Vec<Round>>;

    fn classifications(&self) -> LedgerResult<Vec<CompanyClassification>>;

    /// Get the source's name for logging
    fn name(&self) -> &str {
        "LedgerSource"
    }
}

/// Read-only snapshot of the three input tables for one computation run
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub investors: Vec<Investor>,
    pub rounds: Vec<Round>,
    classifications: HashMap<CompanyId, CompanyClassification>,
}

impl LedgerSnapshot {
    pub fn new(
        investors: Vec<Investor>,
        rounds: Vec<Round>,
        classifications: Vec<CompanyClassification>,
    ) -> Self {
        let mut by_company = HashMap::with_capacity(classifications.len());
        for classification in classifications {
            let company_id = classification.company_id;
            if by_company.insert(company_id, classification).is_some() {
                debug!("Duplicate classification for company {}, keeping last", company_id);
            }
        }

        Self {
            investors,
            rounds,
            classifications: by_company,
        }
    }

    /// Load every table from a ledger source
    pub fn load(source: &dyn LedgerSource) -> LedgerResult<Self> {
        let investors = source.investors().inspect_err(|e| warn!("{}: {}", source.name(), e))?;
        let rounds = source.rounds().inspect_err(|e| warn!("{}: {}", source.name(), e))?;
        let classifications = source
            .classifications()
            .inspect_err(|e| warn!("{}: {}", source.name(), e))?;

        debug!(
            "Loaded snapshot from {}: investors={}, rounds={}, classifications={}",
            source.name(),
            investors.len(),
            rounds.len(),
            classifications.len()
        );

        Ok(Self::new(investors, rounds, classifications))
    }

    /// Classification of a target company, if known
    pub fn classification(&self, company_id: CompanyId) -> Option<&CompanyClassification> {
        self.classifications.get(&company_id)
    }

    pub fn classification_count(&self) -> usize {
        self.classifications.len()
    }
}
