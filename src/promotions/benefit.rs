//! Promotion Benefits
//!
//! The customer-facing benefit a campaign grants. Only price benefits
//! participate in price resolution; the rest are display-only.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::discounts::{DiscountError, percent_of_minor};

/// Benefit configuration for a promotion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Benefit<'a> {
    /// Take a fraction off the shelf price (e.g. "15% off").
    PercentOff(Percentage),

    /// Take a flat amount off the shelf price (e.g. "₱50 off").
    ///
    /// The amount is not scaled by the price; prices floor at zero downstream.
    AmountOff(Money<'a, Currency>),

    /// Buy a quantity, get a further quantity free. Display-only here;
    /// quantity pricing happens at the basket, not on the shelf.
    BuyXGetY {
        /// Quantity the customer must buy
        buy: u8,

        /// Quantity granted for free
        get: u8,
    },

    /// Waive the delivery fee. Display-only.
    FreeShipping,

    /// Operator-defined benefit with no fixed pricing semantics. Display-only.
    Custom,
}

impl<'a> Benefit<'a> {
    /// Whether this benefit takes part in price resolution.
    #[must_use]
    pub fn affects_price(&self) -> bool {
        matches!(self, Benefit::PercentOff(_) | Benefit::AmountOff(_))
    }

    /// The discount this benefit takes off the given price.
    ///
    /// Display-only benefits contribute a zero discount. A flat amount is
    /// returned as-is, even when it exceeds the price; clamping is the
    /// caller's concern so that candidate discounts stay comparable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a percentage cannot be safely represented in minor units
    ///   ([`DiscountError::PercentConversion`]).
    /// - a flat amount is in a different currency than the price
    ///   ([`DiscountError::Money`]).
    pub fn discount_against(
        &self,
        price: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        match self {
            Benefit::PercentOff(percent) => {
                let minor = percent_of_minor(*percent, price.to_minor_units())?;

                Ok(Money::from_minor(minor, price.currency()))
            }
            Benefit::AmountOff(amount) => {
                // Subtracting first surfaces any currency mismatch.
                price.sub(*amount)?;

                Ok(*amount)
            }
            Benefit::BuyXGetY { .. } | Benefit::FreeShipping | Benefit::Custom => {
                Ok(Money::from_minor(0, price.currency()))
            }
        }
    }
}
