//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

new_key_type! {
    /// Category Key
    pub struct CategoryKey;
}

/// Category metadata
#[derive(Debug, Clone)]
pub struct Category {
    /// Category name
    pub name: String,
}

/// Product (the pricing-relevant subset of a catalogue record)
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// List price
    pub price: Money<'a, Currency>,

    /// Operator-set markdown. When present this is the selling price
    /// before any promotion is applied.
    pub markdown: Option<Money<'a, Currency>>,

    /// Category the product belongs to, if any
    pub category: Option<CategoryKey>,
}

impl<'a> Product<'a> {
    /// Returns the shelf price: the markdown when one is set, otherwise the list price.
    ///
    /// Promotions discount the shelf price, not the list price. A markdown
    /// above the list price is not corrected here; it passes through.
    pub fn shelf_price(&self) -> Money<'a, Currency> {
        self.markdown.unwrap_or(self.price)
    }
}
