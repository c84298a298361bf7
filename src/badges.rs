//! Badges
//!
//! Short labels describing a promotion's benefit, for shelf-edge and
//! product-card display. Currency symbols come from the benefit's own
//! `Money` value, never from this module.

use crate::{discounts::percent_points, promotions::benefit::Benefit};

/// Short display label for a benefit.
///
/// Percent benefits render as percent points (`-15%`), flat amounts with
/// their own currency's symbol (`-₱50.00`), quantity deals as `{buy}+{get}`,
/// and everything else as the generic `PROMO`.
#[must_use]
pub fn badge_text(benefit: &Benefit<'_>) -> String {
    match benefit {
        Benefit::PercentOff(percent) => {
            format!("-{}%", percent_points(*percent).normalize())
        }
        Benefit::AmountOff(amount) => format!("-{amount}"),
        Benefit::BuyXGetY { buy, get } => format!("{buy}+{get}"),
        Benefit::FreeShipping | Benefit::Custom => "PROMO".to_string(),
    }
}
