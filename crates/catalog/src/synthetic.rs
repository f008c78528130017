//! Deterministic pseudo-random catalogs for benchmarks and demos.

use crate::error::Result;
use crate::index::Catalog;
use crate::types::{Availability, MAX_RATING, Product, ProductId};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const CATEGORIES: &[&str] = &[
    "Laptops", "Phones", "Tablets", "Audio", "Wearables", "Cameras", "Gaming", "Accessories",
];
const BRANDS: &[&str] = &["Apple", "Samsung", "Sony", "Dell", "Google", "Bose", "Lenovo", "Asus"];
const COLORS: &[&str] = &["Black", "White", "Silver", "Blue", "Red", "Green"];
const FEATURES: &[&str] = &[
    "5G", "Wireless", "Bluetooth", "Noise Cancelling", "Waterproof", "Fast Charging",
    "OLED", "Touchscreen", "Backlit Keyboard", "GPS",
];

/// Generate `count` products with ids `1..=count`.
///
/// The same seed always yields the same catalog.
pub fn generate(count: usize, seed: u64) -> Result<Catalog> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut products = Vec::with_capacity(count);

    for i in 0..count {
        let id = (i + 1) as ProductId;
        let category = *CATEGORIES.choose(&mut rng).unwrap_or(&"Accessories");
        let brand = *BRANDS.choose(&mut rng).unwrap_or(&"Generic");

        let mut product = Product::new(id, format!("{} {} {}", brand, category, id), category);
        product.brand = brand.to_string();
        product.color = COLORS.choose(&mut rng).copied().unwrap_or("Black").to_string();
        product.price = Some((rng.random_range(1_000..300_000) as f64) / 100.0);
        product.rating = Some((rng.random_range(0.0..=MAX_RATING) * 10.0).round() / 10.0);
        product.availability = Availability::ALL.choose(&mut rng).copied();
        let feature_count = rng.random_range(0..4);
        product.features = FEATURES
            .choose_multiple(&mut rng, feature_count)
            .map(|f| f.to_string())
            .collect();

        products.push(product);
    }

    Catalog::from_products(products)
}
