use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Relative change of `current` against `archival`, in percent.
///
/// A zero `archival` yields `0.0`, the same as "no change".
pub fn percent_change(current: f64, archival: f64) -> f64 {
    if archival == 0.0 {
        return 0.0;
    }

    (current - archival) / archival * 100.0
}

/// Rounds the exact binary value of `value` to `dp` decimal places, half to
/// even. `2.675` is stored just below the midpoint and rounds to `2.67`.
/// Values outside the `Decimal` range are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(dp))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal_macros::dec;

    #[test]
    fn percent_change_relative_to_archival() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
        assert_eq!(percent_change(100.0, 100.0), 0.0);
        assert_eq!(percent_change(-10.0, -20.0), -50.0);
    }

    #[test]
    fn zero_archival_is_zero_change() {
        for current in [0.0, 1.0, -3.5, 1e12] {
            assert_eq!(percent_change(current, 0.0), 0.0);
        }
        assert_eq!(percent_change(5.0, -0.0), 0.0);
    }

    #[test]
    fn rounds_to_requested_places() {
        assert!((round_dp(0.123456789, 6) - 0.123457).abs() < 1e-12);
        assert!((round_dp(33.333333333, 2) - 33.33).abs() < 1e-12);
        assert!((round_dp(-12.345678, 2) + 12.35).abs() < 1e-12);
        assert_eq!(round_dp(42.0, 6), 42.0);
    }

    #[test]
    fn midpoints_round_half_to_even() {
        assert_eq!(Decimal::from_f64(round_dp(2.5, 0)).unwrap(), dec!(2));
        assert_eq!(Decimal::from_f64(round_dp(3.5, 0)).unwrap(), dec!(4));
    }

    #[test]
    fn rounds_stored_binary_value_not_shortest_decimal() {
        let cases = [
            (2.665, 2, 2.67),
            (2.675, 2, 2.67),
            (12.345, 2, 12.35),
            (0.125, 2, 0.12),
            (0.0000125, 6, 0.000013),
            (1.0000005, 6, 1.000001),
        ];
        for (value, dp, expected) in cases {
            let rounded = round_dp(value, dp);
            assert!(
                (rounded - expected).abs() < 1e-12,
                "round_dp({}, {}) = {}, expected {}",
                value,
                dp,
                rounded,
                expected
            );
        }
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }
}
