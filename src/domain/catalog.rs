use std::collections::BTreeMap;

use crate::domain::process::ProcessDefinition;

/// Read-only category → product → process lookup, built once and passed by
/// reference to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessCatalog {
    categories: BTreeMap<String, BTreeMap<String, ProcessDefinition>>,
}

impl ProcessCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous definition when `product` already existed in `category`.
    pub fn insert(
        &mut self,
        category: &str,
        definition: ProcessDefinition,
    ) -> Option<ProcessDefinition> {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(definition.name.clone(), definition)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Empty when the category is unknown.
    pub fn products(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|products| products.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn definition(&self, category: &str, product: &str) -> Option<&ProcessDefinition> {
        self.categories.get(category)?.get(product)
    }

    /// Every `(category, definition)` pair, ordered by category then product.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProcessDefinition)> {
        self.categories.iter().flat_map(|(category, products)| {
            products
                .values()
                .map(move |definition| (category.as_str(), definition))
        })
    }

    pub fn product_count(&self) -> usize {
        self.categories.values().map(|products| products.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.product_count() == 0
    }
}
