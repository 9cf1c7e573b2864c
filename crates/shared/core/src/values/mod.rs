use rust_decimal::Decimal;

/// Monetary amount - uses Decimal so window sums are exact
pub type Amount = Decimal;

/// Specialization ratio in [0, 1]
pub type Ratio = Decimal;

/// Calendar year
pub type Year = i32;
