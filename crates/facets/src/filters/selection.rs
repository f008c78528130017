//! Multi-select filter over a text attribute.
//!
//! Covers category, brand, color and feature facets. Selecting several
//! options of the same group widens the result (logical OR).

use crate::state::FacetGroup;
use crate::traits::Filter;
use catalog::Product;
use std::collections::BTreeSet;

/// Keeps products whose attribute value is one of the selected options.
///
/// ## Algorithm
/// - Category, brand, color: exact match of the single attribute value
/// - Feature: at least one of the product's features is selected
pub struct SelectionFilter {
    group: FacetGroup,
    selected: BTreeSet<String>,
}

impl SelectionFilter {
    /// Create a new SelectionFilter.
    ///
    /// # Arguments
    /// * `group` - One of Category, Brand, Color or Feature
    /// * `selected` - Option ids that are allowed through
    pub fn new(group: FacetGroup, selected: BTreeSet<String>) -> Self {
        Self { group, selected }
    }
}

impl Filter for SelectionFilter {
    fn name(&self) -> &str {
        match self.group {
            FacetGroup::Category => "CategoryFilter",
            FacetGroup::Brand => "BrandFilter",
            FacetGroup::Color => "ColorFilter",
            FacetGroup::Feature => "FeatureFilter",
            _ => "SelectionFilter",
        }
    }

    fn group(&self) -> FacetGroup {
        self.group
    }

    fn matches(&self, product: &Product) -> bool {
        match self.group {
            FacetGroup::Category => self.selected.contains(&product.category),
            FacetGroup::Brand => self.selected.contains(&product.brand),
            FacetGroup::Color => self.selected.contains(&product.color),
            FacetGroup::Feature => product.features.iter().any(|f| self.selected.contains(f)),
            _ => true,
        }
    }
}
