//! Promotion Fixtures

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::{
        FixtureError,
        products::{parse_percentage, parse_price},
    },
    products::{CategoryKey, ProductKey},
    promotions::{Promotion, PromotionKey, PromotionMeta, benefit::Benefit, schedule::Schedule, scope::Scope},
};

/// Wrapper for promotions in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of promotion key -> promotion fixture
    pub promotions: FxHashMap<String, PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Promotion name
    pub name: String,

    /// Benefit configuration
    pub benefit: BenefitFixture,

    /// Scope configuration
    pub scope: ScopeFixture,

    /// Start of the active window (RFC 3339)
    pub starts_at: String,

    /// End of the active window (RFC 3339)
    pub ends_at: String,

    /// Operator kill switch; defaults to enabled
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// Benefit configuration from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BenefitFixture {
    /// Percentage off (e.g., "15%" or "0.15")
    PercentOff {
        /// Percentage value
        value: String,
    },

    /// Flat amount off (e.g., "50.00 PHP")
    AmountOff {
        /// Amount value
        value: String,
    },

    /// Buy a quantity, get a further quantity free
    BuyXGetY {
        /// Quantity the customer must buy
        buy: u8,

        /// Quantity granted for free
        get: u8,
    },

    /// Waive the delivery fee
    FreeShipping,

    /// Operator-defined benefit
    Custom,
}

/// Scope configuration from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScopeFixture {
    /// Every product in the catalogue
    AllProducts,

    /// Products in any of the listed categories
    Categories {
        /// Category keys
        categories: Vec<String>,
    },

    /// The listed products only
    Products {
        /// Product keys
        products: Vec<String>,
    },

    /// Segmented by customer tier
    CustomerTier,
}

impl PromotionFixture {
    /// Convert to `PromotionMeta` and `Promotion`, resolving scope keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the benefit or timestamps cannot be parsed, or
    /// if a scoped category or product is unknown.
    pub fn try_into_promotion(
        self,
        key: PromotionKey,
        product_keys: &FxHashMap<String, ProductKey>,
        category_keys: &FxHashMap<String, CategoryKey>,
    ) -> Result<(PromotionMeta, Promotion<'static>), FixtureError> {
        let benefit = match self.benefit {
            BenefitFixture::PercentOff { value } => Benefit::PercentOff(parse_percentage(&value)?),
            BenefitFixture::AmountOff { value } => {
                let (minor, currency) = parse_price(&value)?;

                Benefit::AmountOff(Money::from_minor(minor, currency))
            }
            BenefitFixture::BuyXGetY { buy, get } => Benefit::BuyXGetY { buy, get },
            BenefitFixture::FreeShipping => Benefit::FreeShipping,
            BenefitFixture::Custom => Benefit::Custom,
        };

        let scope = match self.scope {
            ScopeFixture::AllProducts => Scope::AllProducts,
            ScopeFixture::Categories { categories } => {
                let keys = categories
                    .into_iter()
                    .map(|name| {
                        category_keys
                            .get(&name)
                            .copied()
                            .ok_or(FixtureError::CategoryNotFound(name))
                    })
                    .collect::<Result<SmallVec<[CategoryKey; 4]>, FixtureError>>()?;

                Scope::Categories(keys)
            }
            ScopeFixture::Products { products } => {
                let keys = products
                    .into_iter()
                    .map(|name| {
                        product_keys
                            .get(&name)
                            .copied()
                            .ok_or(FixtureError::ProductNotFound(name))
                    })
                    .collect::<Result<SmallVec<[ProductKey; 4]>, FixtureError>>()?;

                Scope::Products(keys)
            }
            ScopeFixture::CustomerTier => Scope::CustomerTier,
        };

        let schedule = Schedule::new(
            parse_timestamp(&self.starts_at)?,
            parse_timestamp(&self.ends_at)?,
        );

        let meta = PromotionMeta { name: self.name };
        let promotion = Promotion::new(key, benefit, scope, schedule).with_enabled(self.enabled);

        Ok((meta, promotion))
    }
}

/// Parse an RFC 3339 timestamp string (e.g., "2025-06-01T00:00:00Z")
///
/// # Errors
///
/// Returns an error if the string is not a valid RFC 3339 instant.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, FixtureError> {
    s.parse::<Timestamp>()
        .map_err(|_err| FixtureError::InvalidTimestamp(s.to_string()))
}
