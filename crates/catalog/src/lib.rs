//! Catalog domain module.
//!
//! A fixed, read-only list of products. Built once at startup (from the
//! built-in seed or a JSON file) and never mutated afterwards.

pub mod catalog;
pub mod product;
pub mod seed;

pub use catalog::{Catalog, CategoryGroup};
pub use product::{Product, ProductId};
pub use seed::seed_products;
