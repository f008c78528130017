//! Filter to ensure a minimum customer rating.

use crate::state::FacetGroup;
use crate::traits::Filter;
use catalog::Product;

/// Removes products rated below a threshold.
///
/// Only added to a pipeline when the threshold is above zero; unrated
/// products never pass a non-zero threshold.
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Lowest accepted rating (typically 1 to 4 stars)
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn group(&self) -> FacetGroup {
        FacetGroup::Rating
    }

    fn matches(&self, product: &Product) -> bool {
        product.rating.is_some_and(|rating| rating >= self.min_rating)
    }
}
