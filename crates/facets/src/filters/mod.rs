//! Filter implementations for the facet pipeline.
//!
//! This module contains the concrete constraints a `FilterState` can
//! express, each composable into a FilterPipeline.

pub mod availability;
pub mod minimum_rating;
pub mod price_range;
pub mod selection;
pub mod text_query;

// Re-export for convenience
pub use availability::AvailabilityFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use price_range::PriceRangeFilter;
pub use selection::SelectionFilter;
pub use text_query::TextQueryFilter;
