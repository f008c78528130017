//! The FilterPipeline chains the filters of one FilterState.
//!
//! Filters combine with logical AND; OR-within-a-group is handled inside
//! each filter. Besides plain filtering the pipeline can evaluate a product
//! against every filter except those of one group, which is the building
//! block of facet counts.

use crate::filters::{
    AvailabilityFilter, MinimumRatingFilter, PriceRangeFilter, SelectionFilter, TextQueryFilter,
};
use crate::sort::sort_products;
use crate::state::{FacetGroup, FilterState};
use crate::traits::Filter;
use catalog::Product;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::from_state(&state);
/// let visible = pipeline.apply(catalog.products());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Build the pipeline for every active constraint of `state`.
    ///
    /// Option groups without a selection add no filter; the price range is
    /// always present.
    pub fn from_state(state: &FilterState) -> Self {
        let mut pipeline = Self::new();

        for group in [
            FacetGroup::Category,
            FacetGroup::Brand,
            FacetGroup::Color,
            FacetGroup::Feature,
        ] {
            if state.has_selection(group) {
                let selected = state.selected_ids(group).into_iter().collect();
                pipeline = pipeline.add_filter(SelectionFilter::new(group, selected));
            }
        }

        if !state.availability.is_empty() {
            pipeline = pipeline.add_filter(AvailabilityFilter::new(state.availability.clone()));
        }

        pipeline = pipeline.add_filter(PriceRangeFilter::new(state.price_range));

        if state.min_rating > 0.0 {
            pipeline = pipeline.add_filter(MinimumRatingFilter::new(state.min_rating));
        }

        let terms = state.query_terms();
        if !terms.is_empty() {
            pipeline = pipeline.add_filter(TextQueryFilter::new(terms));
        }

        pipeline
    }

    /// Whether `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Whether `product` passes every filter not belonging to `group`.
    pub fn matches_except(&self, product: &Product, group: FacetGroup) -> bool {
        self.filters
            .iter()
            .filter(|f| f.group() != group)
            .all(|f| f.matches(product))
    }

    /// Apply all filters in sequence, preserving catalog order.
    ///
    /// ## Algorithm
    /// 1. Start with every product
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Retain matching products
    ///    c. Log output count
    /// 3. Return what is left
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut current: Vec<&'a Product> = products.iter().collect();
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current.retain(|product| filter.matches(product));
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Names of the filters in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `product` satisfies every constraint of `state`.
pub fn matches(product: &Product, state: &FilterState) -> bool {
    FilterPipeline::from_state(state).matches(product)
}

/// Filter `products` by `state`, then sort by `state.sort`.
///
/// Neither the products nor the state are modified.
pub fn apply_filters<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    let mut visible = FilterPipeline::from_state(state).apply(products);
    sort_products(&mut visible, state.sort);
    visible
}
