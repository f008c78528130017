//! Faceted filtering for storefront product listings.
//!
//! This crate provides:
//! - FilterState, the user-controlled selections and ordering
//! - Filter trait and implementations, one per constraint kind
//! - FilterPipeline, composing the filters of one state
//! - Facet derivation and count refresh
//! - FacetEngine, the façade a UI layer calls after each state change
//!
//! ## Semantics
//! Options within one facet group combine with OR, groups combine with AND.
//! The count shown next to an option is the result size if that option
//! alone were selected in its group, all other groups unchanged.
//!
//! ## Example Usage
//! ```ignore
//! use facets::{FacetEngine, FacetGroup};
//!
//! let engine = FacetEngine::new(catalog.clone());
//! let mut state = engine.initial_state();
//!
//! state.toggle(FacetGroup::Category, "Laptops");
//! let view = engine.refresh(&state);
//! for product in &view.products {
//!     println!("{}", product.name);
//! }
//! ```

pub mod counts;
pub mod engine;
pub mod facet_set;
pub mod filter_pipeline;
pub mod filters;
pub mod sort;
pub mod state;
pub mod traits;

// Re-export main types
pub use counts::recompute_counts;
pub use engine::{FacetEngine, FacetView};
pub use facet_set::{FacetOption, FacetSet, RATING_THRESHOLDS, RatingOption, derive_facets};
pub use filter_pipeline::{FilterPipeline, apply_filters, matches};
pub use sort::{SortDirection, SortKey, SortSpec, sort_products};
pub use state::{FacetGroup, FilterState, PriceRange};
pub use traits::Filter;
