//! Inclusive price range filter.
//!
//! Unlike the option filters this one is always part of the pipeline; the
//! default range simply admits every priced product.

use crate::state::{FacetGroup, PriceRange};
use crate::traits::Filter;
use catalog::Product;

/// Keeps products priced within `[min, max]`.
///
/// ## Algorithm
/// - Products without a usable price are excluded
/// - An inverted range (`min > max`) matches nothing
pub struct PriceRangeFilter {
    range: PriceRange,
}

impl PriceRangeFilter {
    pub fn new(range: PriceRange) -> Self {
        Self { range }
    }
}

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn group(&self) -> FacetGroup {
        FacetGroup::Price
    }

    fn matches(&self, product: &Product) -> bool {
        product.price.is_some_and(|price| self.range.contains(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: Option<f64>) -> Product {
        let mut product = Product::new(1, "Item", "Misc");
        product.price = price;
        product
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = PriceRangeFilter::new(PriceRange::new(800.0, 1000.0));

        assert!(filter.matches(&priced(Some(800.0))));
        assert!(filter.matches(&priced(Some(1000.0))));
        assert!(!filter.matches(&priced(Some(799.99))));
        assert!(!filter.matches(&priced(Some(1000.01))));
    }

    #[test]
    fn test_missing_price_never_matches() {
        let filter = PriceRangeFilter::new(PriceRange::unbounded());
        assert!(!filter.matches(&priced(None)));
        assert!(filter.matches(&priced(Some(0.0))));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let filter = PriceRangeFilter::new(PriceRange::new(5000.0, 0.0));
        assert!(!filter.matches(&priced(Some(100.0))));
    }
}
