//! Facet count refresh.
//!
//! The count next to an option previews the result size if that option
//! alone were selected in its group, with every other group's constraints
//! held fixed. Counting inside the already-filtered result instead would
//! show zero for every sibling of a selected option.

use crate::facet_set::{FacetOption, FacetSet, Tally, derive_facets, rating_label};
use crate::filter_pipeline::FilterPipeline;
use crate::state::{FacetGroup, FilterState};
use catalog::Product;

/// Recompute every facet count of `products` under `state`.
///
/// ## Algorithm
/// 1. Derive the option lists from the full catalog (zero-count options stay)
/// 2. For each option group, tally values over the products that pass every
///    filter except the group's own
/// 3. Do the same for the rating thresholds
/// 4. Mark selections; keep selected options missing from the catalog so
///    they can still be deselected
pub fn recompute_counts(products: &[Product], state: &FilterState) -> FacetSet {
    if products.is_empty() {
        return FacetSet::empty();
    }

    let pipeline = FilterPipeline::from_state(state);
    let mut facets = derive_facets(products);

    for group in FacetGroup::OPTION_GROUPS {
        let mut tally = Tally::default();
        for product in products.iter().filter(|p| pipeline.matches_except(p, group)) {
            for id in group.values_of(product) {
                tally.add(id);
            }
        }

        let Some(options) = facets.options_mut(group) else {
            continue;
        };
        for option in options.iter_mut() {
            option.count = tally.count(&option.id);
            option.selected = state.is_selected(group, &option.id);
        }
        for id in state.selected_ids(group) {
            if !options.iter().any(|o| o.id == id) {
                options.push(FacetOption {
                    label: group.option_label(&id),
                    id,
                    count: 0,
                    selected: true,
                });
            }
        }
    }

    let rating_base: Vec<&Product> = products
        .iter()
        .filter(|p| pipeline.matches_except(p, FacetGroup::Rating))
        .collect();
    for option in facets.ratings.iter_mut() {
        option.count = rating_base
            .iter()
            .filter(|p| p.rating.is_some_and(|r| r >= option.threshold))
            .count();
        option.selected = state.min_rating == option.threshold;
        option.label = rating_label(option.threshold);
    }

    facets
}
