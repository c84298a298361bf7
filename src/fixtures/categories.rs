//! Category Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::products::Category;

/// Wrapper for categories in YAML
#[derive(Debug, Deserialize)]
pub struct CategoriesFixture {
    /// Map of category key -> category fixture
    pub categories: FxHashMap<String, CategoryFixture>,
}

/// Category Fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category name
    pub name: String,
}

impl From<CategoryFixture> for Category {
    fn from(fixture: CategoryFixture) -> Self {
        Category { name: fixture.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_fixture_parses_yaml() -> Result<(), serde_norway::Error> {
        let yaml = r"
categories:
  beverages:
    name: Beverages
  snacks:
    name: Snacks
";
        let fixture: CategoriesFixture = serde_norway::from_str(yaml)?;

        assert_eq!(fixture.categories.len(), 2);

        Ok(())
    }

    #[test]
    fn category_fixture_converts_to_category() {
        let category = Category::from(CategoryFixture {
            name: "Pantry".to_string(),
        });

        assert_eq!(category.name, "Pantry");
    }
}
