//! # Catalog Filtering
//!
//! The storefront's search box and its two dropdown filters.
//!
//! A product is shown when it passes all three checks:
//! ```text
//! search   : empty, or found (case-insensitive) in name / brand / category / any tag
//! category : empty, or exactly equal
//! unit     : absent, or exactly equal
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductUnit};

/// Search and filter parameters for the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Option<ProductUnit>,
}

impl CatalogQuery {
    pub fn search(text: impl Into<String>) -> Self {
        CatalogQuery {
            search: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_unit(mut self, unit: ProductUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.category_filter().is_none() && self.unit.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let search_ok = match self.search_term() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                let contains = |field: &str| field.to_lowercase().contains(&term);

                contains(&product.name)
                    || product.brand.as_deref().is_some_and(contains)
                    || contains(&product.category)
                    || product.tags.iter().any(|tag| contains(tag))
            }
        };

        let category_ok = self
            .category_filter()
            .map_or(true, |category| product.category == category);
        let unit_ok = self.unit.map_or(true, |unit| product.unit == unit);

        search_ok && category_ok && unit_ok
    }

    /// Products matching the query, in catalog order.
    pub fn apply<'a, I>(&self, products: I) -> Vec<Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::sample_product;

    fn catalog() -> Vec<Product> {
        let mut paste = sample_product("1");
        paste.name = "Gino Tomato Paste".to_string();
        paste.brand = Some("Gino".to_string());
        paste.category = "Tomato Products".to_string();
        paste.unit = ProductUnit::Tin;
        paste.tags = vec!["stew".to_string()];

        let mut seasoning = sample_product("2");
        seasoning.name = "Larsor Chicken Seasoning".to_string();

        let mut rice = sample_product("3");
        rice.name = "Local Rice".to_string();
        rice.brand = None;
        rice.category = "Grains & Foodstuff".to_string();
        rice.unit = ProductUnit::Bag;
        rice.tags = Vec::new();

        vec![paste, seasoning, rice]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let products = catalog();
        let query = CatalogQuery::default();
        assert!(query.is_empty());
        assert_eq!(ids(&query.apply(&products)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let products = catalog();

        assert_eq!(ids(&CatalogQuery::search("TOMATO").apply(&products)), vec!["1"]);
        assert_eq!(ids(&CatalogQuery::search("gino").apply(&products)), vec!["1"]);
        assert_eq!(ids(&CatalogQuery::search("Stew").apply(&products)), vec!["1"]);
        assert_eq!(ids(&CatalogQuery::search("grains").apply(&products)), vec!["3"]);
        assert!(CatalogQuery::search("caviar").apply(&products).is_empty());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let products = catalog();
        assert_eq!(CatalogQuery::search("   ").apply(&products).len(), 3);
    }

    #[test]
    fn test_category_and_unit_filters_combine() {
        let products = catalog();

        let seasoning = CatalogQuery::default().with_category("Seasoning & Spices");
        assert_eq!(ids(&seasoning.apply(&products)), vec!["2"]);

        let bags = CatalogQuery::default().with_unit(ProductUnit::Bag);
        assert_eq!(ids(&bags.apply(&products)), vec!["3"]);

        let none = CatalogQuery::search("rice").with_unit(ProductUnit::Tin);
        assert!(none.apply(&products).is_empty());
    }
}
