//! SSI Ports
//!
//! Port definitions (traits) for the specialization index.
//! These define the boundary between the engine and the storage collaborator
//! that owns the investment ledger.

mod error;
mod ledger;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{LedgerSnapshot, LedgerSource, LedgerTable};
