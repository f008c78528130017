//! # Facet Engine
//!
//! The single entry point a UI layer talks to. It owns a shared catalog and
//! turns a `FilterState` into everything a storefront listing renders:
//! 1. The filtered, sorted products
//! 2. Facet options with preview counts
//!
//! The engine holds no mutable state; the caller owns the `FilterState`
//! and calls [`FacetEngine::refresh`] after each change.

use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, Product};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::counts::recompute_counts;
use crate::facet_set::{FacetSet, derive_facets};
use crate::filter_pipeline::apply_filters;
use crate::state::FilterState;

/// Result of one refresh
#[derive(Debug, Clone, Serialize)]
pub struct FacetView<'a> {
    /// Matching products in display order
    pub products: Vec<&'a Product>,
    pub facets: FacetSet,
    /// Catalog size, for "showing N of M" labels
    pub total: usize,
}

/// Faceted filter engine over one catalog
#[derive(Clone)]
pub struct FacetEngine {
    catalog: Arc<Catalog>,
}

impl FacetEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Facet options with unconstrained counts.
    pub fn facets(&self) -> FacetSet {
        derive_facets(self.catalog.products())
    }

    /// The state a listing starts from: nothing selected, price range
    /// spanning the catalog.
    pub fn initial_state(&self) -> FilterState {
        FilterState::new(self.facets().price_bounds)
    }

    /// Adopt a state saved elsewhere, clamping its price range to this
    /// catalog's bounds.
    pub fn restore_state(&self, mut state: FilterState) -> FilterState {
        state.price_range = state.price_range.clamp_to(self.facets().price_bounds);
        state
    }

    /// Filtered and sorted products.
    pub fn apply(&self, state: &FilterState) -> Vec<&Product> {
        apply_filters(self.catalog.products(), state)
    }

    /// Facet options with counts under `state`.
    pub fn recompute_counts(&self, state: &FilterState) -> FacetSet {
        recompute_counts(self.catalog.products(), state)
    }

    /// Recompute products and counts for `state`.
    #[instrument(skip_all, fields(catalog_size = self.catalog.len()))]
    pub fn refresh(&self, state: &FilterState) -> FacetView<'_> {
        let start_time = Instant::now();

        let products = self.apply(state);
        debug!("Filtered to {} products", products.len());

        let facets = self.recompute_counts(state);

        info!(
            "Refreshed listing: {} of {} products in {:.2?}",
            products.len(),
            self.catalog.len(),
            start_time.elapsed()
        );

        FacetView {
            products,
            facets,
            total: self.catalog.len(),
        }
    }
}
