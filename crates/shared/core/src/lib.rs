//! SSI Core Domain
//!
//! Pure domain types for the investor specialization index.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Bands
    Band,
    // Ledger records
    CategoryTags,
    CompanyClassification,
    CompanyId,
    ExitKind,
    Investor,
    InvestorId,
    Round,
    // Output
    SpecializationRecord,
    parse_round_date,
};
pub use values::{Amount, Ratio, Year};
