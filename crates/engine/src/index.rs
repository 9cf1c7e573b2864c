//! Specialization Index Calculator
//!
//! ratio = industry / total over the lookback window, 0 when nothing was
//! deployed. A zero denominator is a meaningful state, never an error.

use rust_decimal::Decimal;
use ssi_core::{Amount, Ratio};

/// Industry share of window capital, clamped to [0, 1]
pub fn specialization_ratio(industry: Amount, total: Amount) -> Ratio {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    industry
        .checked_div(total)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE)
}
