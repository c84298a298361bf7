//! Fixtures
//!
//! YAML-backed sample catalogues: categories, products and promotions
//! loaded into keyed metadata maps, standing in for the hosted data store.

use std::{fs, path::PathBuf};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    fixtures::{
        categories::CategoriesFixture, products::ProductsFixture, promotions::PromotionsFixture,
    },
    pricing::{PricingError, ResolvedPrice, resolve_price},
    products::{Category, CategoryKey, Product, ProductKey},
    promotions::{Promotion, PromotionKey, PromotionMeta},
};

pub mod categories;
pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid timestamp format
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Promotion not found
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Price resolution error
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// `SlotMaps` to store the actual types with generated keys
    product_meta: SlotMap<ProductKey, Product<'a>>,
    category_meta: SlotMap<CategoryKey, Category>,
    promotion_meta: SlotMap<PromotionKey, PromotionMeta>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,
    category_keys: FxHashMap<String, CategoryKey>,
    promotion_keys: FxHashMap<String, PromotionKey>,

    /// Pre-built promotions
    promotions: Vec<Promotion<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            product_meta: SlotMap::with_key(),
            category_meta: SlotMap::with_key(),
            promotion_meta: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            category_keys: FxHashMap::default(),
            promotion_keys: FxHashMap::default(),
            promotions: Vec::new(),
            currency: None,
        }
    }

    /// Load categories from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_categories(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("categories")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: CategoriesFixture = serde_norway::from_str(&contents)?;

        tracing::debug!(set = name, count = fixture.categories.len(), "loaded category fixtures");

        for (key, category_fixture) in fixture.categories {
            let category_key = self.category_meta.insert(category_fixture.into());

            self.category_keys.insert(key, category_key);
        }

        Ok(self)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a category
    /// reference is unknown, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        tracing::debug!(set = name, count = fixture.products.len(), "loaded product fixtures");

        for (key, product_fixture) in fixture.products {
            let product = product_fixture.into_product(&self.category_keys)?;
            let currency = product.price.currency();

            // Validate currency consistency across the set
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product_key = self.product_meta.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load promotions from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// scoped product or category reference is unknown.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        tracing::debug!(set = name, count = fixture.promotions.len(), "loaded promotion fixtures");

        for (key, promotion_fixture) in fixture.promotions {
            let promotion_key = self.promotion_meta.insert(PromotionMeta {
                name: String::new(),
            });

            let (meta, promotion) = promotion_fixture.try_into_promotion(
                promotion_key,
                &self.product_keys,
                &self.category_keys,
            )?;

            if let Some(meta_slot) = self.promotion_meta.get_mut(promotion_key) {
                *meta_slot = meta;
            }

            self.promotions.push(promotion);
            self.promotion_keys.insert(key, promotion_key);
        }

        Ok(self)
    }

    /// Load a complete fixture set (categories, products, and promotions
    /// with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_categories(name)?
            .load_products(name)?
            .load_promotions(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        let product_key = self.product_key(key)?;

        self.product_meta
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a category key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found.
    pub fn category_key(&self, key: &str) -> Result<CategoryKey, FixtureError> {
        self.category_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::CategoryNotFound(key.to_string()))
    }

    /// Get a promotion by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion(&self, key: &str) -> Result<&Promotion<'a>, FixtureError> {
        let promotion_key = self.promotion_key(key)?;

        self.promotions
            .iter()
            .find(|promotion| promotion.key() == promotion_key)
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get a promotion key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion_key(&self, key: &str) -> Result<PromotionKey, FixtureError> {
        self.promotion_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get promotion metadata by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion_meta(&self, key: &str) -> Result<&PromotionMeta, FixtureError> {
        let promotion_key = self.promotion_key(key)?;

        self.promotion_meta
            .get(promotion_key)
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get all promotions
    pub fn promotions(&self) -> &[Promotion<'a>] {
        &self.promotions
    }

    /// Resolve every loaded product against the loaded promotions at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if any single resolution fails.
    pub fn resolve_all(
        &self,
        now: Timestamp,
    ) -> Result<Vec<(ProductKey, ResolvedPrice<'a>)>, FixtureError> {
        let mut rows = Vec::with_capacity(self.product_meta.len());

        for (key, product) in &self.product_meta {
            rows.push((key, resolve_price(key, product, &self.promotions, now)?));
        }

        Ok(rows)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static rusty_money::iso::Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Get the product metadata `SlotMap`
    pub fn product_meta_map(&self) -> &SlotMap<ProductKey, Product<'a>> {
        &self.product_meta
    }

    /// Get the category metadata `SlotMap`
    pub fn category_meta_map(&self) -> &SlotMap<CategoryKey, Category> {
        &self.category_meta
    }

    /// Get the promotion metadata `SlotMap`
    pub fn promotion_meta_map(&self) -> &SlotMap<PromotionKey, PromotionMeta> {
        &self.promotion_meta
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
