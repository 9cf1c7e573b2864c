mod band;
mod company;
mod exit_kind;
mod investor;
mod record;
mod round;

pub use band::Band;
pub use company::{CompanyClassification, CompanyId};
pub use exit_kind::ExitKind;
pub use investor::{CategoryTags, Investor, InvestorId};
pub use record::SpecializationRecord;
pub use round::{Round, parse_round_date};
