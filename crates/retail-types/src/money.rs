//! Money rounding.
//!
//! Amounts are carried as `f64` on the wire, but rounding is done in exact
//! decimal arithmetic on the shortest decimal form of the float. Scaling
//! `1.005_f64` by 100 in binary gives `100.49999999999999`, which would round
//! down; going through the decimal form keeps the midpoint a midpoint.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Round half away from zero at two decimal digits:
/// `sign(x) · floor(|x| · 100 + 0.5) / 100`.
///
/// Non-finite values and values outside the decimal range are returned
/// unchanged.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Display for f64 yields the shortest string that round-trips.
    let Ok(exact) = Decimal::from_str(&value.to_string()) else {
        return value;
    };

    let half = Decimal::new(5, 1);
    let Some(scaled) = exact
        .abs()
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.checked_add(half))
    else {
        return value;
    };
    let magnitude = scaled.floor() / Decimal::ONE_HUNDRED;
    let rounded = if exact.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    };

    rounded.to_f64().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.50 * 0.15), 0.38);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(10.0 * 0.15), 1.5);
        assert_eq!(round2(2.8849), 2.88);
    }

    #[test]
    fn test_already_rounded_values_are_stable() {
        for value in [0.0, 2.5, 10.0, 11.5, 2.88, 99.99, 1234.56] {
            assert_eq!(round2(value), value);
        }
    }

    #[test]
    fn test_accumulated_float_error() {
        // 0.1 + 0.2 = 0.30000000000000004 in binary
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(12.99 * 3.0), 38.97);
    }

    #[test]
    fn test_values_too_large_to_scale_are_unchanged() {
        assert_eq!(round2(1e27), 1e27);
        assert_eq!(round2(-1e27), -1e27);
        assert_eq!(round2(1e300), 1e300);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }
}
