//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, PHP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{CategoryKey, Product},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// List price (e.g., "249.00 PHP")
    pub price: String,

    /// Optional operator markdown (e.g., "199.00 PHP")
    pub markdown: Option<String>,

    /// Optional category key
    pub category: Option<String>,
}

impl ProductFixture {
    /// Convert to a [`Product`], resolving the category key.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed, the markdown currency
    /// differs from the list price currency, or the category is unknown.
    pub fn into_product(
        self,
        category_keys: &FxHashMap<String, CategoryKey>,
    ) -> Result<Product<'static>, FixtureError> {
        let (price_minor, currency) = parse_price(&self.price)?;
        let price = Money::from_minor(price_minor, currency);

        let markdown = self
            .markdown
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(markdown_minor, markdown_currency)| {
                if markdown_currency == currency {
                    Ok(Money::from_minor(markdown_minor, markdown_currency))
                } else {
                    Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        markdown_currency.iso_alpha_code.to_string(),
                    ))
                }
            })
            .transpose()?;

        let category = self
            .category
            .map(|name| {
                category_keys
                    .get(&name)
                    .copied()
                    .ok_or(FixtureError::CategoryNotFound(name))
            })
            .transpose()?;

        Ok(Product {
            name: self.name,
            price,
            markdown,
            category,
        })
    }
}

/// Parse price string (e.g., "249.00 PHP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "PHP" => PHP,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / 100.0))
    } else {
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_accepts_php() -> Result<(), FixtureError> {
        let (minor, currency) = parse_price("249.00 PHP")?;

        assert_eq!(minor, 24_900);
        assert_eq!(currency, PHP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("249.00PHP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_percentage_accepts_both_formats() -> Result<(), FixtureError> {
        assert_eq!(parse_percentage("15%")?, Percentage::from(0.15));
        assert_eq!(parse_percentage("0.15")?, Percentage::from(0.15));
        assert_eq!(parse_percentage("  15%  ")?, Percentage::from(0.15));

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_invalid_format() {
        let result = parse_percentage("invalid");

        assert!(matches!(result, Err(FixtureError::InvalidPercentage(_))));
    }

    #[test]
    fn into_product_resolves_markdown_and_category() -> Result<(), FixtureError> {
        let mut category_keys = FxHashMap::default();
        let mut categories = slotmap::SlotMap::<CategoryKey, ()>::with_key();

        category_keys.insert("beverages".to_string(), categories.insert(()));

        let fixture = ProductFixture {
            name: "Barako Coffee 250g".to_string(),
            price: "249.00 PHP".to_string(),
            markdown: Some("199.00 PHP".to_string()),
            category: Some("beverages".to_string()),
        };

        let product = fixture.into_product(&category_keys)?;

        assert_eq!(product.price, Money::from_minor(24_900, PHP));
        assert_eq!(product.markdown, Some(Money::from_minor(19_900, PHP)));
        assert!(product.category.is_some());

        Ok(())
    }

    #[test]
    fn into_product_rejects_markdown_currency_mismatch() {
        let fixture = ProductFixture {
            name: "Odd Import".to_string(),
            price: "249.00 PHP".to_string(),
            markdown: Some("1.99 USD".to_string()),
            category: None,
        };

        let result = fixture.into_product(&FxHashMap::default());

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn into_product_rejects_unknown_category() {
        let fixture = ProductFixture {
            name: "Barako Coffee 250g".to_string(),
            price: "249.00 PHP".to_string(),
            markdown: None,
            category: Some("nonexistent".to_string()),
        };

        let result = fixture.into_product(&FxHashMap::default());

        assert!(matches!(result, Err(FixtureError::CategoryNotFound(name)) if name == "nonexistent"));
    }
}
