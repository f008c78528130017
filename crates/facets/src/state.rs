//! The user-controlled filter state.
//!
//! `FilterState` is owned by the UI layer and mutated in place through the
//! reducer-style methods below; the engine only ever reads it.

use crate::sort::SortSpec;
use catalog::{Availability, Product};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A filterable dimension of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetGroup {
    Category,
    Brand,
    Color,
    Feature,
    Availability,
    Price,
    Rating,
    Query,
}

impl FacetGroup {
    /// Groups made of discrete, multi-selectable options.
    pub const OPTION_GROUPS: [FacetGroup; 5] = [
        FacetGroup::Category,
        FacetGroup::Brand,
        FacetGroup::Color,
        FacetGroup::Feature,
        FacetGroup::Availability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetGroup::Category => "category",
            FacetGroup::Brand => "brand",
            FacetGroup::Color => "color",
            FacetGroup::Feature => "feature",
            FacetGroup::Availability => "availability",
            FacetGroup::Price => "price",
            FacetGroup::Rating => "rating",
            FacetGroup::Query => "query",
        }
    }

    /// Option ids a product contributes to this group.
    ///
    /// Blank attributes contribute nothing and repeated features count once.
    /// Non-option groups always return an empty list.
    pub fn values_of<'a>(&self, product: &'a Product) -> Vec<&'a str> {
        let single = |value: &'a str| {
            if value.is_empty() { Vec::new() } else { vec![value] }
        };
        match self {
            FacetGroup::Category => single(&product.category),
            FacetGroup::Brand => single(&product.brand),
            FacetGroup::Color => single(&product.color),
            FacetGroup::Feature => product.distinct_features(),
            FacetGroup::Availability => product.availability.map(|a| a.as_str()).into_iter().collect(),
            FacetGroup::Price | FacetGroup::Rating | FacetGroup::Query => Vec::new(),
        }
    }

    /// Display label for an option id of this group.
    pub fn option_label(&self, id: &str) -> String {
        match self {
            FacetGroup::Availability => id
                .parse::<Availability>()
                .map(|a| a.label().to_string())
                .unwrap_or_else(|_| id.to_string()),
            _ => id.to_string(),
        }
    }
}

impl fmt::Display for FacetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds.
///
/// A range with `min > max` is tolerated and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that admits every non-negative price.
    pub fn unbounded() -> Self {
        Self { min: 0.0, max: f64::MAX }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }

    /// Restrict this range to lie within `bounds`.
    pub fn clamp_to(&self, bounds: PriceRange) -> PriceRange {
        PriceRange {
            min: self.min.max(bounds.min),
            max: self.max.min(bounds.max),
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Every user-selected constraint plus the requested ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub categories: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub features: BTreeSet<String>,
    pub availability: BTreeSet<Availability>,
    pub price_range: PriceRange,
    /// 0 means no rating constraint
    pub min_rating: f64,
    pub query: Option<String>,
    pub sort: SortSpec,
}

impl FilterState {
    /// A state with nothing selected and the given price range.
    pub fn new(price_range: PriceRange) -> Self {
        Self {
            price_range,
            ..Self::default()
        }
    }

    /// Whether option `id` of `group` is currently selected.
    pub fn is_selected(&self, group: FacetGroup, id: &str) -> bool {
        match group {
            FacetGroup::Availability => id
                .parse::<Availability>()
                .is_ok_and(|a| self.availability.contains(&a)),
            _ => self.labels(group).is_some_and(|set| set.contains(id)),
        }
    }

    /// Whether `group` currently constrains the result set.
    pub fn has_selection(&self, group: FacetGroup) -> bool {
        match group {
            FacetGroup::Availability => !self.availability.is_empty(),
            FacetGroup::Price => true,
            FacetGroup::Rating => self.min_rating > 0.0,
            FacetGroup::Query => !self.query_terms().is_empty(),
            _ => self.labels(group).is_some_and(|set| !set.is_empty()),
        }
    }

    /// Selected option ids of an option group, in sorted order.
    pub fn selected_ids(&self, group: FacetGroup) -> Vec<String> {
        match group {
            FacetGroup::Availability => self
                .availability
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
            _ => self
                .labels(group)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// Add option `id` to `group`. Returns true if the state changed.
    ///
    /// Unknown availability ids and non-option groups are ignored.
    pub fn select(&mut self, group: FacetGroup, id: &str) -> bool {
        match group {
            FacetGroup::Availability => match id.parse::<Availability>() {
                Ok(status) => self.availability.insert(status),
                Err(_) => false,
            },
            _ => self
                .labels_mut(group)
                .is_some_and(|set| set.insert(id.to_string())),
        }
    }

    /// Remove option `id` from `group`. Returns true if the state changed.
    pub fn deselect(&mut self, group: FacetGroup, id: &str) -> bool {
        match group {
            FacetGroup::Availability => id
                .parse::<Availability>()
                .is_ok_and(|status| self.availability.remove(&status)),
            _ => self.labels_mut(group).is_some_and(|set| set.remove(id)),
        }
    }

    /// Flip option `id` of `group`. Returns whether it is now selected.
    pub fn toggle(&mut self, group: FacetGroup, id: &str) -> bool {
        if self.is_selected(group, id) {
            self.deselect(group, id);
            false
        } else {
            self.select(group, id)
        }
    }

    /// Drop every constraint of `group`.
    pub fn clear_group(&mut self, group: FacetGroup) {
        match group {
            FacetGroup::Availability => self.availability.clear(),
            FacetGroup::Price => self.price_range = PriceRange::unbounded(),
            FacetGroup::Rating => self.min_rating = 0.0,
            FacetGroup::Query => self.query = None,
            _ => {
                if let Some(set) = self.labels_mut(group) {
                    set.clear();
                }
            }
        }
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.price_range = PriceRange::new(min, max);
    }

    pub fn set_min_rating(&mut self, threshold: f64) {
        self.min_rating = threshold;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.query = if query.trim().is_empty() { None } else { Some(query) };
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Back to "nothing selected" over `price_bounds`, keeping the sort.
    pub fn reset(&mut self, price_bounds: PriceRange) {
        let sort = self.sort;
        *self = Self::new(price_bounds);
        self.sort = sort;
    }

    /// A copy of this state whose `group` selection is exactly `{id}`.
    pub fn with_exclusive_selection(&self, group: FacetGroup, id: &str) -> FilterState {
        let mut state = self.clone();
        state.clear_group(group);
        state.select(group, id);
        state
    }

    /// Lowercased whitespace-separated query terms.
    pub fn query_terms(&self) -> Vec<String> {
        self.query
            .as_deref()
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default()
    }

    fn labels(&self, group: FacetGroup) -> Option<&BTreeSet<String>> {
        match group {
            FacetGroup::Category => Some(&self.categories),
            FacetGroup::Brand => Some(&self.brands),
            FacetGroup::Color => Some(&self.colors),
            FacetGroup::Feature => Some(&self.features),
            _ => None,
        }
    }

    fn labels_mut(&mut self, group: FacetGroup) -> Option<&mut BTreeSet<String>> {
        match group {
            FacetGroup::Category => Some(&mut self.categories),
            FacetGroup::Brand => Some(&mut self.brands),
            FacetGroup::Color => Some(&mut self.colors),
            FacetGroup::Feature => Some(&mut self.features),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortDirection, SortKey};

    #[test]
    fn test_toggle_round_trip() {
        let mut state = FilterState::default();

        assert!(state.toggle(FacetGroup::Category, "Laptops"));
        assert!(state.is_selected(FacetGroup::Category, "Laptops"));
        assert!(state.has_selection(FacetGroup::Category));

        assert!(!state.toggle(FacetGroup::Category, "Laptops"));
        assert!(!state.has_selection(FacetGroup::Category));
    }

    #[test]
    fn test_availability_selection_by_id() {
        let mut state = FilterState::default();

        assert!(state.select(FacetGroup::Availability, "pre_order"));
        assert!(state.availability.contains(&Availability::PreOrder));
        assert!(!state.select(FacetGroup::Availability, "discontinued"));
        assert_eq!(state.selected_ids(FacetGroup::Availability), vec!["pre_order"]);
    }

    #[test]
    fn test_non_option_groups_ignore_selection() {
        let mut state = FilterState::default();
        assert!(!state.select(FacetGroup::Price, "100"));
        assert!(state.selected_ids(FacetGroup::Rating).is_empty());
    }

    #[test]
    fn test_price_range_inverted_contains_nothing() {
        let range = PriceRange::new(900.0, 100.0);
        assert!(!range.contains(500.0));
        assert!(!range.contains(900.0));
    }

    #[test]
    fn test_price_range_clamp() {
        let clamped = PriceRange::new(0.0, 10_000.0).clamp_to(PriceRange::new(50.0, 2_000.0));
        assert_eq!(clamped, PriceRange::new(50.0, 2_000.0));
    }

    #[test]
    fn test_reset_keeps_sort() {
        let mut state = FilterState::default();
        state.select(FacetGroup::Brand, "Sony");
        state.set_min_rating(4.0);
        state.set_sort(SortSpec::new(SortKey::Price, SortDirection::Descending));

        state.reset(PriceRange::new(10.0, 20.0));

        assert!(!state.has_selection(FacetGroup::Brand));
        assert_eq!(state.min_rating, 0.0);
        assert_eq!(state.price_range, PriceRange::new(10.0, 20.0));
        assert_eq!(state.sort.key, SortKey::Price);
    }

    #[test]
    fn test_blank_query_is_no_constraint() {
        let mut state = FilterState::default();
        state.set_query("   ");
        assert!(state.query.is_none());

        state.set_query("Noise  Cancelling");
        assert_eq!(state.query_terms(), vec!["noise", "cancelling"]);
        assert!(state.has_selection(FacetGroup::Query));
    }

    #[test]
    fn test_state_from_partial_json() {
        let json = r#"{
            "categories": ["Laptops"],
            "availability": ["in_stock"],
            "sort": {"key": "popularity", "direction": "desc"}
        }"#;
        let state: FilterState = serde_json::from_str(json).unwrap();

        assert!(state.is_selected(FacetGroup::Category, "Laptops"));
        assert_eq!(state.price_range, PriceRange::unbounded());
        assert_eq!(state.sort, SortSpec::default());
    }

    #[test]
    fn test_values_of_skips_blanks_and_duplicates() {
        let mut product = Product::new(1, "Buds", "");
        product.features = vec!["ANC".into(), "ANC".into()];
        product.availability = Some(Availability::LowStock);

        assert!(FacetGroup::Category.values_of(&product).is_empty());
        assert_eq!(FacetGroup::Feature.values_of(&product), vec!["ANC"]);
        assert_eq!(FacetGroup::Availability.values_of(&product), vec!["low_stock"]);
        assert_eq!(FacetGroup::Availability.option_label("low_stock"), "Low Stock");
    }
}
