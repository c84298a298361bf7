//! Discount arithmetic
//!
//! Minor-unit money maths shared by benefits, pricing and display code.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculate the discount amount in minor units for a percentage of a minor unit amount.
///
/// Rounds to whole minor units, midpoint away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication
/// overflows or the result cannot be represented in minor units.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, DiscountError> {
    let fraction = percent * Decimal::ONE;

    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let Some(applied) = fraction.checked_mul(minor) else {
        return Err(DiscountError::PercentConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().ok_or(DiscountError::PercentConversion)
}

/// Converts a fractional percentage to percent points for display.
pub fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_minor_computes_exact_fraction() -> Result<(), DiscountError> {
        assert_eq!(percent_of_minor(Percentage::from(0.15), 10_000)?, 1_500);
        assert_eq!(percent_of_minor(Percentage::from(0.20), 19_900)?, 3_980);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_midpoint_away_from_zero() -> Result<(), DiscountError> {
        // 0.15 * 50 = 7.5, rounds to 8.
        assert_eq!(percent_of_minor(Percentage::from(0.15), 50)?, 8);

        Ok(())
    }

    #[test]
    fn percent_of_minor_of_zero_is_zero() -> Result<(), DiscountError> {
        assert_eq!(percent_of_minor(Percentage::from(0.15), 0)?, 0);
        assert_eq!(percent_of_minor(Percentage::from(0.0), 10_000)?, 0);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(Decimal::MAX);
        let result = percent_of_minor(percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_points_prints_percent_points() {
        assert_eq!(
            percent_points(Percentage::from(0.25)),
            Decimal::from_i64(25).unwrap_or(Decimal::ZERO)
        );
    }

    #[test]
    fn percent_points_keeps_two_decimal_places() {
        let points = percent_points(Percentage::from(0.1234));

        assert_eq!(points.to_string(), "12.34");
    }
}
