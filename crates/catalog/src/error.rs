//! Error types for the catalog crate.

use crate::types::ProductId;
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog path does not exist
    #[error("Failed to open catalog: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog file is not valid JSON or not shaped like a product list
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Two records share the same product id
    #[error("Duplicate product id {id}")]
    DuplicateProduct { id: ProductId },

    /// A field had a value outside its domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
