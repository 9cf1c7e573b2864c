use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Discrete specialization band
///
/// Bands partition [0, 1] into half-open intervals of width 0.2; the top
/// band is closed so that a ratio of exactly 1 belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    /// [0, 0.2)
    Minimal,
    /// [0.2, 0.4)
    Low,
    /// [0.4, 0.6)
    Moderate,
    /// [0.6, 0.8)
    High,
    /// [0.8, 1.0]
    Dominant,
}

impl Band {
    pub const ALL: [Band; 5] = [
        Band::Minimal,
        Band::Low,
        Band::Moderate,
        Band::High,
        Band::Dominant,
    ];

    /// Inclusive lower edge
    pub fn lower_bound(&self) -> Decimal {
        match self {
            Band::Minimal => dec!(0),
            Band::Low => dec!(0.2),
            Band::Moderate => dec!(0.4),
            Band::High => dec!(0.6),
            Band::Dominant => dec!(0.8),
        }
    }

    /// Upper edge (exclusive, except for the top band)
    pub fn upper_bound(&self) -> Decimal {
        match self {
            Band::Minimal => dec!(0.2),
            Band::Low => dec!(0.4),
            Band::Moderate => dec!(0.6),
            Band::High => dec!(0.8),
            Band::Dominant => dec!(1),
        }
    }

    /// Position of the band, 0 for the lowest
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Minimal => "[0,0.2)",
            Band::Low => "[0.2,0.4)",
            Band::Moderate => "[0.4,0.6)",
            Band::High => "[0.6,0.8)",
            Band::Dominant => "[0.8,1.0]",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
