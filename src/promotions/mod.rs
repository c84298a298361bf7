//! Promotions

use jiff::Timestamp;
use slotmap::new_key_type;

use crate::{
    products::{CategoryKey, ProductKey},
    promotions::{benefit::Benefit, schedule::Schedule, scope::Scope},
};

pub mod benefit;
pub mod schedule;
pub mod scope;

new_key_type! {
    /// Promotion Key
    pub struct PromotionKey;
}

/// Promotion metadata
#[derive(Debug, Default)]
pub struct PromotionMeta {
    /// Promotion name
    pub name: String,
}

/// A time-bounded promotional campaign.
///
/// Campaigns are authored by an operator, soft-paused via the enabled flag
/// and never versioned; an edit mutates the record in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion<'a> {
    key: PromotionKey,
    benefit: Benefit<'a>,
    scope: Scope,
    schedule: Schedule,
    enabled: bool,
}

impl<'a> Promotion<'a> {
    /// Create an enabled promotion.
    pub fn new(key: PromotionKey, benefit: Benefit<'a>, scope: Scope, schedule: Schedule) -> Self {
        Self {
            key,
            benefit,
            scope,
            schedule,
            enabled: true,
        }
    }

    /// Set the operator kill switch.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Return the promotion key.
    pub fn key(&self) -> PromotionKey {
        self.key
    }

    /// Return the benefit.
    pub fn benefit(&self) -> &Benefit<'a> {
        &self.benefit
    }

    /// Return the scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Return the schedule.
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Whether the operator kill switch is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the promotion is enabled and inside its window at `now`.
    ///
    /// A disabled promotion is never live, regardless of its dates.
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.enabled && self.schedule.contains(now)
    }

    /// Whether this promotion's scope covers the given product.
    #[must_use]
    pub fn applies_to(&self, product: ProductKey, category: Option<CategoryKey>) -> bool {
        self.scope.matches(product, category)
    }

    /// Whether this promotion participates in pricing the given product at `now`.
    #[must_use]
    pub fn is_applicable(
        &self,
        product: ProductKey,
        category: Option<CategoryKey>,
        now: Timestamp,
    ) -> bool {
        self.is_live(now) && self.applies_to(product, category)
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use slotmap::SlotMap;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn june() -> Result<Schedule, jiff::Error> {
        Ok(Schedule::new(
            "2025-06-01T00:00:00Z".parse()?,
            "2025-06-30T23:59:59Z".parse()?,
        ))
    }

    #[test]
    fn new_promotion_is_enabled() -> TestResult {
        let promotion = Promotion::new(
            PromotionKey::default(),
            Benefit::PercentOff(Percentage::from(0.15)),
            Scope::AllProducts,
            june()?,
        );

        assert!(promotion.is_enabled());
        assert!(promotion.is_live("2025-06-15T12:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn disabled_promotion_is_never_live() -> TestResult {
        let promotion = Promotion::new(
            PromotionKey::default(),
            Benefit::PercentOff(Percentage::from(0.15)),
            Scope::AllProducts,
            june()?,
        )
        .with_enabled(false);

        assert!(!promotion.is_live("2025-06-15T12:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn promotion_outside_window_is_not_live() -> TestResult {
        let promotion = Promotion::new(
            PromotionKey::default(),
            Benefit::PercentOff(Percentage::from(0.15)),
            Scope::AllProducts,
            june()?,
        );

        assert!(!promotion.is_live("2025-07-15T12:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn is_applicable_combines_liveness_and_scope() -> TestResult {
        let mut products = SlotMap::<ProductKey, ()>::with_key();
        let scoped = products.insert(());
        let other = products.insert(());

        let mut keys = SlotMap::<PromotionKey, ()>::with_key();
        let key = keys.insert(());

        let promotion = Promotion::new(
            key,
            Benefit::PercentOff(Percentage::from(0.15)),
            Scope::Products(smallvec![scoped]),
            june()?,
        );

        let live: Timestamp = "2025-06-15T12:00:00Z".parse()?;
        let stale: Timestamp = "2025-07-15T12:00:00Z".parse()?;

        assert!(promotion.is_applicable(scoped, None, live));
        assert!(!promotion.is_applicable(other, None, live));
        assert!(!promotion.is_applicable(scoped, None, stale));

        Ok(())
    }

    #[test]
    fn accessors_return_constructor_values() -> TestResult {
        let mut keys = SlotMap::<PromotionKey, ()>::with_key();
        let key = keys.insert(());
        let schedule = june()?;

        let promotion = Promotion::new(
            key,
            Benefit::FreeShipping,
            Scope::CustomerTier,
            schedule,
        );

        assert_eq!(promotion.key(), key);
        assert_ne!(promotion.key(), PromotionKey::default());
        assert_eq!(promotion.benefit(), &Benefit::FreeShipping);
        assert_eq!(promotion.scope(), &Scope::CustomerTier);
        assert_eq!(promotion.schedule(), schedule);

        Ok(())
    }
}
