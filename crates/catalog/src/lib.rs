//! # Catalog Crate
//!
//! Product data for the storefront filter engine.
//!
//! ## Main Components
//!
//! - **types**: Product record and stock status
//! - **parser**: Lenient JSON catalog parsing
//! - **index**: The ordered [`Catalog`] with id lookups
//! - **synthetic**: Seeded catalog generator for benchmarks
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("data/catalog.json"))?;
//! let laptop = catalog.get_product(1).unwrap();
//! println!("{} costs {:?}", laptop.name, laptop.price);
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod synthetic;
pub mod types;

pub use error::{CatalogError, Result};
pub use index::Catalog;
pub use types::{Availability, MAX_RATING, Product, ProductId};
