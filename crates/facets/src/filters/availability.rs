//! Filter on stock status.

use crate::state::FacetGroup;
use crate::traits::Filter;
use catalog::{Availability, Product};
use std::collections::BTreeSet;

/// Keeps products whose stock status is one of the selected statuses.
///
/// Products without a known status never match.
pub struct AvailabilityFilter {
    selected: BTreeSet<Availability>,
}

impl AvailabilityFilter {
    pub fn new(selected: BTreeSet<Availability>) -> Self {
        Self { selected }
    }
}

impl Filter for AvailabilityFilter {
    fn name(&self) -> &str {
        "AvailabilityFilter"
    }

    fn group(&self) -> FacetGroup {
        FacetGroup::Availability
    }

    fn matches(&self, product: &Product) -> bool {
        product
            .availability
            .is_some_and(|status| self.selected.contains(&status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_filter() {
        let filter = AvailabilityFilter::new(
            [Availability::InStock, Availability::LowStock].into_iter().collect(),
        );

        let mut in_stock = Product::new(1, "A", "Laptops");
        in_stock.availability = Some(Availability::InStock);
        let mut pre_order = Product::new(2, "B", "Phones");
        pre_order.availability = Some(Availability::PreOrder);
        let unknown = Product::new(3, "C", "Audio");

        assert!(filter.matches(&in_stock));
        assert!(!filter.matches(&pre_order));
        assert!(!filter.matches(&unknown));
    }
}
