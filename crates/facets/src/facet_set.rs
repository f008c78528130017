//! Facet options and their initial derivation from a catalog.

use crate::state::{FacetGroup, PriceRange};
use catalog::{Availability, Product};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rating thresholds offered as "N stars & up" options.
pub const RATING_THRESHOLDS: [f64; 4] = [4.0, 3.0, 2.0, 1.0];

/// One selectable value within a facet group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

/// One "minimum rating" choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingOption {
    pub threshold: f64,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

/// Everything the UI needs to render its filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSet {
    pub categories: Vec<FacetOption>,
    pub brands: Vec<FacetOption>,
    pub colors: Vec<FacetOption>,
    pub features: Vec<FacetOption>,
    pub availability: Vec<FacetOption>,
    pub ratings: Vec<RatingOption>,
    /// Lowest and highest price in the catalog; (0, 0) when nothing is priced
    pub price_bounds: PriceRange,
}

impl FacetSet {
    /// The facet set of an empty catalog.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            brands: Vec::new(),
            colors: Vec::new(),
            features: Vec::new(),
            availability: Vec::new(),
            ratings: Vec::new(),
            price_bounds: PriceRange::new(0.0, 0.0),
        }
    }

    /// Options of an option group; empty for price, rating and query.
    pub fn options(&self, group: FacetGroup) -> &[FacetOption] {
        match group {
            FacetGroup::Category => &self.categories,
            FacetGroup::Brand => &self.brands,
            FacetGroup::Color => &self.colors,
            FacetGroup::Feature => &self.features,
            FacetGroup::Availability => &self.availability,
            FacetGroup::Price | FacetGroup::Rating | FacetGroup::Query => &[],
        }
    }

    pub(crate) fn options_mut(&mut self, group: FacetGroup) -> Option<&mut Vec<FacetOption>> {
        match group {
            FacetGroup::Category => Some(&mut self.categories),
            FacetGroup::Brand => Some(&mut self.brands),
            FacetGroup::Color => Some(&mut self.colors),
            FacetGroup::Feature => Some(&mut self.features),
            FacetGroup::Availability => Some(&mut self.availability),
            FacetGroup::Price | FacetGroup::Rating | FacetGroup::Query => None,
        }
    }

    /// Look up one option by id.
    pub fn option(&self, group: FacetGroup, id: &str) -> Option<&FacetOption> {
        self.options(group).iter().find(|o| o.id == id)
    }

    pub fn is_empty(&self) -> bool {
        FacetGroup::OPTION_GROUPS
            .iter()
            .all(|&group| self.options(group).is_empty())
            && self.ratings.is_empty()
    }
}

/// Counts option ids in first-seen order.
#[derive(Default)]
pub(crate) struct Tally<'a> {
    order: Vec<&'a str>,
    counts: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    pub(crate) fn add(&mut self, id: &'a str) {
        match self.counts.get_mut(id) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(id, 1);
                self.order.push(id);
            }
        }
    }

    pub(crate) fn count(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    fn into_options(self, group: FacetGroup) -> Vec<FacetOption> {
        let mut options: Vec<FacetOption> = self
            .order
            .iter()
            .map(|&id| FacetOption {
                id: id.to_string(),
                label: group.option_label(id),
                count: self.counts[id],
                selected: false,
            })
            .collect();

        if group == FacetGroup::Availability {
            options.sort_by_key(|o| {
                Availability::ALL
                    .iter()
                    .position(|a| a.as_str() == o.id)
                    .unwrap_or(usize::MAX)
            });
        }
        options
    }
}

/// Derive every facet option, with unconstrained counts, from `products`.
///
/// ## Algorithm
/// 1. Tally each option group's values (features deduplicated per product)
/// 2. Compute price bounds over priced products
/// 3. Count products at or above each rating threshold
pub fn derive_facets(products: &[Product]) -> FacetSet {
    if products.is_empty() {
        return FacetSet::empty();
    }

    let mut set = FacetSet::empty();
    for group in FacetGroup::OPTION_GROUPS {
        let mut tally = Tally::default();
        for product in products {
            for id in group.values_of(product) {
                tally.add(id);
            }
        }
        if let Some(options) = set.options_mut(group) {
            *options = tally.into_options(group);
        }
    }

    set.price_bounds = price_bounds(products);
    set.ratings = RATING_THRESHOLDS
        .iter()
        .map(|&threshold| RatingOption {
            threshold,
            label: rating_label(threshold),
            count: products
                .iter()
                .filter(|p| p.rating.is_some_and(|r| r >= threshold))
                .count(),
            selected: false,
        })
        .collect();

    set
}

/// Observed (min, max) price; (0, 0) when no product has a price.
pub fn price_bounds(products: &[Product]) -> PriceRange {
    products
        .iter()
        .filter_map(|p| p.price)
        .fold(None, |bounds: Option<PriceRange>, price| {
            Some(match bounds {
                Some(b) => PriceRange::new(b.min.min(price), b.max.max(price)),
                None => PriceRange::new(price, price),
            })
        })
        .unwrap_or_else(|| PriceRange::new(0.0, 0.0))
}

pub(crate) fn rating_label(threshold: f64) -> String {
    format!("{}+ stars", threshold)
}
