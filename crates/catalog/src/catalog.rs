//! The catalog container and its grouped view.

use std::collections::HashMap;

use indexmap::IndexMap;

use greennest_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};
use crate::seed::seed_products;

/// A fixed, ordered set of products with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

/// One category of the catalog, as shown on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub products: Vec<&'a Product>,
}

impl Catalog {
    /// Build a catalog, validating every record and rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(products.len());

        for (pos, product) in products.iter().enumerate() {
            product.validate()?;
            if index.insert(product.id_typed().clone(), pos).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate product id {}",
                    product.id_typed()
                )));
            }
        }

        Ok(Self { products, index })
    }

    /// The built-in plant catalog.
    pub fn seed() -> Self {
        let products = seed_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(pos, p)| (p.id_typed().clone(), pos))
            .collect();
        Self { products, index }
    }

    /// Parse a JSON array of products and validate it as a catalog.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("catalog json: {e}")))?;
        Self::new(products)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products grouped by category.
    ///
    /// Categories appear in the order they are first seen; products keep
    /// their catalog order within a category.
    pub fn categorized(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: IndexMap<&str, Vec<&Product>> = IndexMap::new();
        for product in &self.products {
            groups.entry(product.category()).or_default().push(product);
        }

        groups
            .into_iter()
            .map(|(category, products)| CategoryGroup { category, products })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greennest_core::Money;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product::new(
            ProductId::new(id).unwrap(),
            name,
            Money::from_minor(100),
            category,
            "",
        )
    }

    fn names<'a>(group: &CategoryGroup<'a>) -> Vec<&'a str> {
        group.products.iter().copied().map(Product::name).collect()
    }

    #[test]
    fn seed_groups_into_four_categories_in_first_seen_order() {
        let catalog = Catalog::seed();
        let groups = catalog.categorized();

        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Tropical", "Low Light", "Focal", "Trailing"]);

        assert_eq!(names(&groups[0]), vec!["Monstera Deliciosa", "Calathea"]);
        assert_eq!(names(&groups[1]), vec!["Snake Plant", "ZZ Plant"]);
        assert_eq!(names(&groups[2]), vec!["Fiddle Leaf Fig"]);
        assert_eq!(names(&groups[3]), vec!["Pothos"]);
    }

    #[test]
    fn seed_passes_full_validation() {
        let seed = Catalog::seed();
        let validated = Catalog::new(seed.products().to_vec()).unwrap();
        assert_eq!(validated, seed);
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            product("p1", "A", "X"),
            product("p1", "B", "Y"),
        ])
        .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("duplicate product id p1")),
            _ => panic!("Expected Validation error for duplicate id"),
        }
    }

    #[test]
    fn get_looks_up_by_id() {
        let catalog = Catalog::seed();
        let id = ProductId::new("p4").unwrap();
        assert_eq!(catalog.get(&id).map(Product::name), Some("ZZ Plant"));
        assert!(catalog.get(&ProductId::new("p99").unwrap()).is_none());
        assert!(catalog.contains(&id));
    }

    #[test]
    fn json_round_trip_preserves_seed() {
        let seed = Catalog::seed();
        let json = seed.to_json().unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), seed);
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with("catalog json")));
    }

    #[test]
    fn empty_catalog_has_no_groups() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categorized().is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: grouping neither drops nor reorders products within a category.
            #[test]
            fn categorized_partitions_catalog(
                cats in proptest::collection::vec(0u8..4, 0..20)
            ) {
                let products: Vec<Product> = cats
                    .iter()
                    .enumerate()
                    .map(|(i, c)| product(&format!("p{i}"), &format!("plant {i}"), &format!("cat{c}")))
                    .collect();
                let catalog = Catalog::new(products).unwrap();
                let groups = catalog.categorized();

                let total: usize = groups.iter().map(|g| g.products.len()).sum();
                prop_assert_eq!(total, catalog.len());

                for group in &groups {
                    prop_assert!(group.products.iter().all(|p| p.category() == group.category));
                    let positions: Vec<usize> = group
                        .products
                        .iter()
                        .map(|p| catalog.products().iter().position(|q| q == *p).unwrap())
                        .collect();
                    prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }
}
