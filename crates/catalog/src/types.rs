//! Core domain types for the storefront catalog.
//!
//! Products are immutable once loaded. Fields that upstream data sources
//! are known to get wrong (prices, ratings, stock status) are modelled as
//! `Option` so that a malformed record still loads and the filter engine
//! can decide how to treat the missing value.

use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a product within one catalog
pub type ProductId = u32;

/// Highest rating a product can carry
pub const MAX_RATING: f64 = 5.0;

// =============================================================================
// Availability
// =============================================================================

/// Stock status shown on the product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    LowStock,
    PreOrder,
}

impl Availability {
    /// Every status, in display order.
    pub const ALL: [Availability; 3] = [
        Availability::InStock,
        Availability::LowStock,
        Availability::PreOrder,
    ];

    /// Stable identifier used in facet ids and state files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in_stock",
            Availability::LowStock => "low_stock",
            Availability::PreOrder => "pre_order",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::LowStock => "Low Stock",
            Availability::PreOrder => "Pre-Order",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `in_stock`, `in-stock`, `In Stock`, `INSTOCK`-style spellings.
impl FromStr for Availability {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "instock" => Ok(Availability::InStock),
            "lowstock" => Ok(Availability::LowStock),
            "preorder" => Ok(Availability::PreOrder),
            _ => Err(CatalogError::InvalidValue {
                field: "availability".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product record as supplied by the catalog.
///
/// Missing text fields default to the empty string, which the filter engine
/// treats as "no value" for facet purposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    /// `None` when the source value was missing or not a usable number
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    /// 0.0 to 5.0; `None` when missing or out of range
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_availability")]
    pub availability: Option<Availability>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: String,
}

impl Product {
    /// Create a product with only the identifying fields set.
    pub fn new(id: ProductId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Features with duplicates and blanks removed, in first-seen order.
    pub fn distinct_features(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            let feature = feature.as_str();
            if !feature.is_empty() && !seen.contains(&feature) {
                seen.push(feature);
            }
        }
        seen
    }
}

/// Accept JSON numbers and numeric strings; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Null or non-string values become the empty string.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Keeps the string entries of a list; anything that is not a list is empty.
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Unknown stock statuses are dropped instead of failing the whole catalog.
fn lenient_availability<'de, D>(deserializer: D) -> Result<Option<Availability>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}
