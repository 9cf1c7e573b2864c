use rust_decimal::Decimal;
use ssi_core::{Band, Ratio};

/// Map a ratio to its specialization band
///
/// Each edge belongs to the band above it, so a ratio of exactly 0.2 is
/// `Band::Low`. Ratios outside [0, 1] are clamped first.
pub fn classify_band(ratio: Ratio) -> Band {
    let ratio = ratio.clamp(Decimal::ZERO, Decimal::ONE);
    Band::ALL
        .iter()
        .rev()
        .find(|band| ratio >= band.lower_bound())
        .copied()
        .unwrap_or(Band::Minimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_edges_belong_to_upper_band() {
        assert_eq!(classify_band(dec!(0)), Band::Minimal);
        assert_eq!(classify_band(dec!(0.2)), Band::Low);
        assert_eq!(classify_band(dec!(0.4)), Band::Moderate);
        assert_eq!(classify_band(dec!(0.6)), Band::High);
        assert_eq!(classify_band(dec!(0.8)), Band::Dominant);
        assert_eq!(classify_band(dec!(1)), Band::Dominant);
    }

    #[test]
    fn test_interior_values() {
        assert_eq!(classify_band(dec!(0.1999999)), Band::Minimal);
        assert_eq!(classify_band(dec!(0.25)), Band::Low);
        assert_eq!(classify_band(dec!(0.5)), Band::Moderate);
        assert_eq!(classify_band(dec!(0.79)), Band::High);
        assert_eq!(classify_band(dec!(0.95)), Band::Dominant);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(classify_band(dec!(-0.1)), Band::Minimal);
        assert_eq!(classify_band(dec!(1.0000001)), Band::Dominant);
    }

    proptest! {
        #[test]
        fn band_contains_its_ratio(millis in 0u32..=1000) {
            let ratio = Decimal::new(millis as i64, 3);
            let band = classify_band(ratio);
            prop_assert!(ratio >= band.lower_bound());
            if band == Band::Dominant {
                prop_assert!(ratio <= band.upper_bound());
            } else {
                prop_assert!(ratio < band.upper_bound());
            }
        }

        #[test]
        fn band_is_monotonic(a in 0u32..=1000, b in 0u32..=1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_band = classify_band(Decimal::new(lo as i64, 3));
            let hi_band = classify_band(Decimal::new(hi as i64, 3));
            prop_assert!(lo_band <= hi_band);
        }
    }
}
