//! Promotion Scopes
//!
//! Which products a campaign's benefit applies to.

use smallvec::SmallVec;

use crate::products::{CategoryKey, ProductKey};

/// Scope selector for a promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every product in the catalogue.
    AllProducts,

    /// Products in any of the listed categories.
    Categories(SmallVec<[CategoryKey; 4]>),

    /// The listed products only.
    Products(SmallVec<[ProductKey; 4]>),

    /// Segmented by customer tier. Tier membership is resolved upstream of
    /// pricing, so this scope never matches during price resolution.
    CustomerTier,
}

impl Scope {
    /// Whether this scope covers the given product.
    ///
    /// An empty category or product list matches nothing.
    #[must_use]
    pub fn matches(&self, product: ProductKey, category: Option<CategoryKey>) -> bool {
        match self {
            Scope::AllProducts => true,
            Scope::Categories(categories) => {
                category.is_some_and(|category| categories.contains(&category))
            }
            Scope::Products(products) => products.contains(&product),
            Scope::CustomerTier => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn all_products_matches_everything() {
        let mut products = SlotMap::<ProductKey, ()>::with_key();
        let product = products.insert(());

        assert!(Scope::AllProducts.matches(product, None));
    }

    #[test]
    fn product_scope_matches_listed_products_only() {
        let mut products = SlotMap::<ProductKey, ()>::with_key();
        let listed = products.insert(());
        let other = products.insert(());

        let scope = Scope::Products(smallvec![listed]);

        assert!(scope.matches(listed, None));
        assert!(!scope.matches(other, None));
    }

    #[test]
    fn category_scope_matches_listed_categories_only() {
        let mut products = SlotMap::<ProductKey, ()>::with_key();
        let product = products.insert(());

        let mut categories = SlotMap::<CategoryKey, ()>::with_key();
        let beverages = categories.insert(());
        let snacks = categories.insert(());

        let scope = Scope::Categories(smallvec![beverages]);

        assert!(scope.matches(product, Some(beverages)));
        assert!(!scope.matches(product, Some(snacks)));
        assert!(!scope.matches(product, None));
    }

    #[test]
    fn empty_lists_match_nothing() {
        let mut products = SlotMap::<ProductKey, ()>::with_key();
        let product = products.insert(());

        let mut categories = SlotMap::<CategoryKey, ()>::with_key();
        let category = categories.insert(());

        assert!(!Scope::Products(SmallVec::new()).matches(product, Some(category)));
        assert!(!Scope::Categories(SmallVec::new()).matches(product, Some(category)));
    }

    #[test]
    fn customer_tier_never_matches_during_resolution() {
        let mut products = SlotMap::<ProductKey, ()>::with_key();
        let product = products.insert(());

        let mut categories = SlotMap::<CategoryKey, ()>::with_key();
        let category = categories.insert(());

        assert!(!Scope::CustomerTier.matches(product, Some(category)));
    }
}
