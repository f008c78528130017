//! Result ordering.
//!
//! Sorting is stable in both directions: descending reverses the comparator,
//! not the output, so products that compare equal keep their filtered order.

use catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Category,
    Rating,
}

impl SortKey {
    /// Case-insensitive parse; `None` for unknown keys.
    pub fn parse(s: &str) -> Option<SortKey> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            "category" => Some(SortKey::Category),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Category => "category",
            SortKey::Rating => "rating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<SortDirection> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sort key plus direction.
///
/// Deserializes leniently: an unknown key yields name ascending, an
/// unknown direction yields ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawSortSpec", into = "RawSortSpec")]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Build from user-supplied strings with the documented fallbacks.
    pub fn parse(key: &str, direction: Option<&str>) -> SortSpec {
        match SortKey::parse(key) {
            Some(key) => SortSpec {
                key,
                direction: direction
                    .and_then(SortDirection::parse)
                    .unwrap_or_default(),
            },
            None => SortSpec::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct RawSortSpec {
    key: Option<String>,
    direction: Option<String>,
}

impl From<RawSortSpec> for SortSpec {
    fn from(raw: RawSortSpec) -> Self {
        match raw.key {
            Some(key) => SortSpec::parse(&key, raw.direction.as_deref()),
            None => SortSpec {
                key: SortKey::Name,
                direction: raw
                    .direction
                    .as_deref()
                    .and_then(SortDirection::parse)
                    .unwrap_or_default(),
            },
        }
    }
}

impl From<SortSpec> for RawSortSpec {
    fn from(spec: SortSpec) -> Self {
        RawSortSpec {
            key: Some(spec.key.as_str().to_string()),
            direction: Some(spec.direction.as_str().to_string()),
        }
    }
}

enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn of(product: &Product, key: SortKey) -> SortValue {
        match key {
            SortKey::Name => SortValue::Text(product.name.to_lowercase()),
            SortKey::Category => SortValue::Text(product.category.to_lowercase()),
            SortKey::Price => SortValue::number(product.price),
            SortKey::Rating => SortValue::number(product.rating),
        }
    }

    /// Missing and non-finite values sort as zero.
    fn number(value: Option<f64>) -> SortValue {
        SortValue::Number(value.filter(|v| v.is_finite()).unwrap_or(0.0))
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Stable in-place sort of product references.
///
/// Sort values are computed once per product rather than per comparison.
pub fn sort_products<'a>(products: &mut [&'a Product], spec: SortSpec) {
    let mut keyed: Vec<(SortValue, &'a Product)> = products
        .iter()
        .map(|p| (SortValue::of(p, spec.key), *p))
        .collect();

    keyed.sort_by(|a, b| spec.direction.apply(a.0.compare(&b.0)));

    for (slot, (_, product)) in products.iter_mut().zip(keyed) {
        *slot = product;
    }
}
