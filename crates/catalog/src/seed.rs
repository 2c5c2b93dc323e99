//! Built-in plant catalog.

use greennest_core::Money;

use crate::product::{Product, ProductId};

const IMAGE_BASE: &str = "https://source.unsplash.com/collection/190727/200x200?plant";

struct SeedRow {
    id: &'static str,
    name: &'static str,
    price: u64,
    category: &'static str,
    image_tag: &'static str,
}

const SEED: [SeedRow; 6] = [
    SeedRow { id: "p1", name: "Monstera Deliciosa", price: 799, category: "Tropical", image_tag: "monstera" },
    SeedRow { id: "p2", name: "Snake Plant", price: 499, category: "Low Light", image_tag: "snake" },
    SeedRow { id: "p3", name: "Fiddle Leaf Fig", price: 1299, category: "Focal", image_tag: "fiddle" },
    SeedRow { id: "p4", name: "ZZ Plant", price: 599, category: "Low Light", image_tag: "zz" },
    SeedRow { id: "p5", name: "Pothos", price: 299, category: "Trailing", image_tag: "pothos" },
    SeedRow { id: "p6", name: "Calathea", price: 899, category: "Tropical", image_tag: "calathea" },
];

/// The six houseplants the shop ships with, in display order.
pub fn seed_products() -> Vec<Product> {
    SEED.iter()
        .map(|row| {
            Product::new(
                ProductId::trusted(row.id),
                row.name,
                Money::from_minor(row.price),
                row.category,
                format!("{IMAGE_BASE},{}", row.image_tag),
            )
        })
        .collect()
}
