//! Parser for catalog JSON files.
//!
//! Two layouts are accepted:
//! - a top-level array of product records: `[{...}, {...}]`
//! - an object wrapping the array: `{"products": [{...}, {...}]}`
//!
//! Records are parsed leniently (see [`Product`]) and then sanitized so
//! that values outside their domain are dropped rather than trusted.

use crate::error::{CatalogError, Result};
use crate::types::{MAX_RATING, Product};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

/// Parse a catalog file from disk.
pub fn parse_products(path: &Path) -> Result<Vec<Product>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let text = fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_products_json(&file_name, &text)
}

/// Parse catalog JSON text. `file` is only used for error messages.
pub fn parse_products_json(file: &str, text: &str) -> Result<Vec<Product>> {
    let document: CatalogDocument =
        serde_json::from_str(text).map_err(|e| CatalogError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    let products = match document {
        CatalogDocument::List(products) => products,
        CatalogDocument::Wrapped { products } => products,
    };

    Ok(products.into_iter().map(sanitize_product).collect())
}

/// Drop numeric values that are outside their domain.
fn sanitize_product(mut product: Product) -> Product {
    if let Some(price) = product.price {
        if price < 0.0 {
            warn!(product_id = product.id, price, "Ignoring negative price");
            product.price = None;
        }
    }
    if let Some(rating) = product.rating {
        if !(0.0..=MAX_RATING).contains(&rating) {
            warn!(product_id = product.id, rating, "Ignoring out-of-range rating");
            product.rating = None;
        }
    }
    product
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;

    #[test]
    fn test_parse_list_layout() {
        let json = r#"[
            {"id": 1, "name": "MacBook Air", "category": "Laptops", "price": 1099,
             "rating": 4.8, "features": ["M2"], "availability": "in_stock"},
            {"id": 2, "name": "Pixel 8", "category": "Phones", "price": 699.0}
        ]"#;
        let products = parse_products_json("catalog.json", json).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Some(1099.0));
        assert_eq!(products[0].availability, Some(Availability::InStock));
        assert_eq!(products[1].rating, None);
    }

    #[test]
    fn test_parse_wrapped_layout() {
        let json = r#"{"products": [{"id": 3, "name": "Earbuds"}]}"#;
        let products = parse_products_json("catalog.json", json).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Earbuds");
    }

    #[test]
    fn test_out_of_domain_values_are_dropped() {
        let json = r#"[{"id": 4, "price": -10, "rating": 7.5}]"#;
        let products = parse_products_json("catalog.json", json).unwrap();

        assert_eq!(products[0].price, None);
        assert_eq!(products[0].rating, None);
    }

    #[test]
    fn test_null_fields_do_not_fail_the_file() {
        let json = r#"[
            {"id": 1, "name": "Cable", "brand": null, "features": null, "price": 5},
            {"id": 2, "name": "Charger", "category": null, "color": null, "features": "fast"}
        ]"#;
        let products = parse_products_json("catalog.json", json).unwrap();

        assert_eq!(products.len(), 2);
        assert!(products[0].brand.is_empty());
        assert!(products[0].features.is_empty());
        assert_eq!(products[0].price, Some(5.0));
        assert!(products[1].category.is_empty());
        assert!(products[1].features.is_empty());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_products_json("broken.json", "{not json").unwrap_err();
        match err {
            CatalogError::ParseError { file, .. } => assert_eq!(file, "broken.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_products(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
