//! Catalog building and lookup.
//!
//! The catalog keeps products in their source order (the filter engine's
//! stable ordering depends on it) next to an id index for direct lookups.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{Product, ProductId};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// An ordered, immutable-once-built set of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from products in order, rejecting duplicate ids.
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        let mut catalog = Catalog {
            products: Vec::with_capacity(products.len()),
            by_id: HashMap::with_capacity(products.len()),
        };
        for product in products {
            catalog.insert_product(product)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON file or a directory of JSON files.
    ///
    /// Directory entries are parsed in parallel and concatenated in
    /// file-name order, so the resulting product order is deterministic.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);

        let products = if path.is_dir() {
            let files = json_files_in(path)?;
            let parsed: Vec<Vec<Product>> = files
                .par_iter()
                .map(|file| parser::parse_products(file))
                .collect::<Result<_>>()?;
            parsed.into_iter().flatten().collect()
        } else {
            parser::parse_products(path)?
        };

        let catalog = Self::from_products(products)?;
        info!("Loaded {} products", catalog.len());
        Ok(catalog)
    }

    /// Append a product, keeping source order.
    pub fn insert_product(&mut self, product: Product) -> Result<()> {
        if self.by_id.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct { id: product.id });
        }
        self.by_id.insert(product.id, self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Get a product by ID
    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.by_id.get(&id).map(|&idx| &self.products[idx])
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}
