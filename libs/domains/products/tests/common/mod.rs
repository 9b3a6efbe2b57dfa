//! Shared fixtures for product tests

#![allow(dead_code)]

use domain_products::{Category, Product};
use serde_json::{Value, json};
use test_utils::TestDataBuilder;

pub const CATEGORY_NAMES: [&str; 6] = [
    "UNKNOWN",
    "CLOTHS",
    "FOOD",
    "HOUSEWARES",
    "AUTOMOTIVE",
    "TOOLS",
];

/// Produces deterministic product bodies for a single test.
pub struct ProductFactory {
    builder: TestDataBuilder,
    next: usize,
}

impl ProductFactory {
    pub fn new(test_name: &str) -> Self {
        Self {
            builder: TestDataBuilder::from_test_name(test_name),
            next: 0,
        }
    }

    /// JSON body accepted by `POST /products`
    pub fn body(&mut self) -> Value {
        let i = self.next;
        self.next += 1;

        json!({
            "name": self.builder.name("product", &i.to_string()),
            "description": format!("Generated product {}", i),
            "price": self.builder.price(i),
            "available": self.builder.flag(i),
            "category": self.builder.pick(i, &CATEGORY_NAMES),
        })
    }

    /// Unsaved product built from the next body
    pub fn product(&mut self) -> Product {
        let mut product = Product::default();
        product.deserialize(&self.body()).unwrap();
        product
    }
}

pub fn fedora() -> Value {
    json!({
        "name": "Fedora",
        "description": "A red hat",
        "price": 12.50,
        "available": true,
        "category": "CLOTHS"
    })
}

pub fn fedora_product() -> Product {
    Product::new("Fedora", "A red hat", "12.50", true, Category::Cloths).unwrap()
}
