use thiserror::Error;

use crate::ledger::LedgerTable;

/// Errors raised at the ledger boundary
///
/// Any of these is fatal to a run: the engine never computes from a partial
/// set of input tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger table '{table}' unavailable: {reason}")]
    Unavailable { table: LedgerTable, reason: String },

    #[error("Unknown ledger table: {0}")]
    UnknownTable(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
