//! Pricing
//!
//! Resolves the single price a customer pays for a product: the shelf price
//! (list price or operator markdown) less the best applicable promotion.

use decimal_percentage::Percentage;
use jiff::Timestamp;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::DiscountError,
    products::{Product, ProductKey},
    promotions::{Promotion, PromotionKey},
};

/// Errors that can occur while resolving a price.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Wrapped discount calculation error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Resolved price for a single product.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPrice<'a> {
    /// List price, unchanged.
    pub list_price: Money<'a, Currency>,

    /// Operator markdown, when one is set.
    pub markdown_price: Option<Money<'a, Currency>>,

    /// Price after the winning promotion, when one applied.
    pub promotion_price: Option<Money<'a, Currency>>,

    /// The price the customer pays.
    pub final_price: Money<'a, Currency>,

    /// The promotion that produced `promotion_price`, when one applied.
    pub applied_promotion: Option<PromotionKey>,
}

impl<'a> ResolvedPrice<'a> {
    /// Whether a promotion applied.
    pub fn is_promoted(&self) -> bool {
        self.applied_promotion.is_some()
    }

    /// Amount saved against the list price, floored at zero.
    ///
    /// A markdown above the list price flows through `final_price`
    /// unchanged, so the floor keeps displayed savings non-negative.
    #[must_use]
    pub fn savings(&self) -> Money<'a, Currency> {
        let saved = self
            .list_price
            .to_minor_units()
            .saturating_sub(self.final_price.to_minor_units());

        Money::from_minor(saved.max(0), self.list_price.currency())
    }

    /// Savings as a fraction of the list price, or zero for a free product.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        let list_minor = self.list_price.to_minor_units();

        if list_minor == 0 {
            return Percentage::from(0.0);
        }

        // Avoid integer division truncation by doing the ratio in decimal space.
        let savings_dec =
            Decimal::from_i64(self.savings().to_minor_units()).unwrap_or(Decimal::ZERO);
        let list_dec = Decimal::from_i64(list_minor).unwrap_or(Decimal::ZERO);

        Percentage::from(savings_dec / list_dec)
    }
}

/// Resolve the price for one product against the given promotions at `now`.
///
/// The shelf price (markdown when set, list price otherwise) is the base
/// that promotions discount; promotions never stack with each other, only
/// on top of at most one markdown. Among applicable promotions the strictly
/// largest discount wins; exact ties go to the first promotion in iteration
/// order. Candidates with a zero or negative discount never win. The final
/// price floors at zero and is not capped at the list price.
///
/// The caller supplies `now`; resolution is pure and deterministic given
/// `(product, promotions, now)`.
///
/// # Errors
///
/// Returns an error if a markdown or flat benefit is in a different
/// currency than the list price, or if a percentage cannot be represented
/// in minor units. No error path performs I/O.
pub fn resolve_price<'a>(
    key: ProductKey,
    product: &Product<'a>,
    promotions: &[Promotion<'a>],
    now: Timestamp,
) -> Result<ResolvedPrice<'a>, PricingError> {
    if let Some(markdown) = product.markdown {
        // Surfaces a currency mismatch between markdown and list price.
        product.price.sub(markdown)?;
    }

    let shelf = product.shelf_price();

    let mut winner: Option<(PromotionKey, i64)> = None;

    for promotion in promotions {
        if !promotion.is_applicable(key, product.category, now) {
            continue;
        }

        let discount = promotion.benefit().discount_against(&shelf)?.to_minor_units();

        if discount <= 0 {
            continue;
        }

        if winner.is_none_or(|(_, best)| discount > best) {
            winner = Some((promotion.key(), discount));
        }
    }

    let (promotion_price, applied_promotion) = match winner {
        Some((promotion, discount)) => {
            let remaining = shelf.to_minor_units().saturating_sub(discount).max(0);

            (
                Some(Money::from_minor(remaining, shelf.currency())),
                Some(promotion),
            )
        }
        None => (None, None),
    };

    Ok(ResolvedPrice {
        list_price: product.price,
        markdown_price: product.markdown,
        promotion_price,
        final_price: promotion_price.unwrap_or(shelf),
        applied_promotion,
    })
}
