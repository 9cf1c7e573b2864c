//! SSI Classifiers
//!
//! Leaf classification steps of the specialization pipeline:
//! - **Round classification**: industry relevance and exit exclusion per round
//! - **Band classification**: ratio to discrete specialization band

mod band;
mod round;

pub use band::classify_band;
pub use round::{ClassificationLookup, RoundClass, RoundClassifier};
