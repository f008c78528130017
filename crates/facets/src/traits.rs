//! Core traits for the filtering pipeline.
//!
//! Each active constraint of a [`FilterState`](crate::FilterState) becomes
//! one `Filter`. Tagging every filter with its facet group is what lets the
//! count refresh evaluate "all constraints except this group".

use crate::state::FacetGroup;
use catalog::Product;

/// A single product predicate belonging to one facet group.
///
/// ## Design Note
/// - `Send + Sync` so a built pipeline can be shared with other threads
/// - Predicates are infallible: malformed records simply do not match
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// The facet group this filter constrains
    fn group(&self) -> FacetGroup;

    /// Whether `product` satisfies this constraint
    fn matches(&self, product: &Product) -> bool;
}
