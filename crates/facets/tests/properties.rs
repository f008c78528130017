//! Property tests for filtering, sorting and counting.

use catalog::{Availability, Product};
use facets::{
    FacetGroup, FilterState, PriceRange, SortDirection, SortKey, SortSpec, apply_filters,
    recompute_counts,
};
use proptest::prelude::*;

const CATEGORIES: &[&str] = &["Laptops", "Phones", "Audio", "Cameras"];
const BRANDS: &[&str] = &["Apple", "Sony", "Dell"];
const COLORS: &[&str] = &["Black", "White", "Silver"];
const FEATURES: &[&str] = &["5G", "OLED", "GPS", "Bluetooth"];

fn arb_product(id: u32) -> impl Strategy<Value = Product> {
    (
        0..CATEGORIES.len(),
        0..BRANDS.len(),
        0..COLORS.len(),
        proptest::option::weighted(0.9, 0u32..2000),
        proptest::option::weighted(0.9, 0u32..=50),
        proptest::collection::vec(0..FEATURES.len(), 0..4),
        proptest::option::of(0..Availability::ALL.len()),
        "[a-zA-Z]{0,3}",
    )
        .prop_map(
            move |(category, brand, color, price, rating, features, availability, name)| {
                let mut product = Product::new(id, name, CATEGORIES[category]);
                product.brand = BRANDS[brand].to_string();
                product.color = COLORS[color].to_string();
                product.price = price.map(f64::from);
                product.rating = rating.map(|r| f64::from(r) / 10.0);
                product.features = features.into_iter().map(|f| FEATURES[f].to_string()).collect();
                product.availability = availability.map(|a| Availability::ALL[a]);
                product
            },
        )
}

fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    (0usize..25).prop_flat_map(|len| {
        (0..len as u32)
            .map(arb_product)
            .collect::<Vec<_>>()
    })
}

fn arb_subset(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(pool.to_vec(), 0..=pool.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

fn arb_sort() -> impl Strategy<Value = SortSpec> {
    (
        prop_oneof![
            Just(SortKey::Name),
            Just(SortKey::Price),
            Just(SortKey::Category),
            Just(SortKey::Rating)
        ],
        prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)],
    )
        .prop_map(|(key, direction)| SortSpec::new(key, direction))
}

fn arb_state() -> impl Strategy<Value = FilterState> {
    (
        arb_subset(CATEGORIES),
        arb_subset(COLORS),
        arb_subset(FEATURES),
        proptest::sample::subsequence(Availability::ALL.to_vec(), 0..=3),
        0u32..1000,
        1000u32..2500,
        0u32..=5,
        arb_sort(),
    )
        .prop_map(
            |(categories, colors, features, availability, min, max, rating, sort)| {
                let mut state = FilterState::new(PriceRange::new(f64::from(min), f64::from(max)));
                state.categories = categories.into_iter().collect();
                state.colors = colors.into_iter().collect();
                state.features = features.into_iter().collect();
                state.availability = availability.into_iter().collect();
                state.min_rating = f64::from(rating);
                state.sort = sort;
                state
            },
        )
}

fn ids(products: &[&Product]) -> Vec<u32> {
    products.iter().map(|p| p.id).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: the same state over the same catalog gives the same output.
    #[test]
    fn apply_is_idempotent(catalog in arb_catalog(), state in arb_state()) {
        let first = ids(&apply_filters(&catalog, &state));
        let second = ids(&apply_filters(&catalog, &state));
        prop_assert_eq!(first, second);
    }

    /// Property: results only ever contain catalog products, each at most once.
    #[test]
    fn result_is_subset(catalog in arb_catalog(), state in arb_state()) {
        let result = apply_filters(&catalog, &state);
        let mut seen = std::collections::HashSet::new();
        for product in &result {
            prop_assert!(catalog.iter().any(|p| p == *product));
            prop_assert!(seen.insert(product.id));
        }
    }

    /// Property: widening any option group never shrinks the result.
    #[test]
    fn widening_a_group_is_monotonic(
        catalog in arb_catalog(),
        state in arb_state(),
        group_idx in 0usize..3,
        option_idx in 0usize..4,
    ) {
        let (group, pool) = [
            (FacetGroup::Category, CATEGORIES),
            (FacetGroup::Color, COLORS),
            (FacetGroup::Feature, FEATURES),
        ][group_idx];
        // only meaningful when the group already constrains the result
        prop_assume!(state.has_selection(group));

        let mut wider = state.clone();
        wider.select(group, pool[option_idx % pool.len()]);

        prop_assert!(apply_filters(&catalog, &wider).len() >= apply_filters(&catalog, &state).len());
    }

    /// Property: narrowing the price range never grows the result.
    #[test]
    fn narrowing_price_is_monotonic(
        catalog in arb_catalog(),
        state in arb_state(),
        raise_min in 0u32..500,
        lower_max in 0u32..500,
    ) {
        let mut narrower = state.clone();
        narrower.set_price_range(
            state.price_range.min + f64::from(raise_min),
            state.price_range.max - f64::from(lower_max),
        );

        prop_assert!(apply_filters(&catalog, &narrower).len() <= apply_filters(&catalog, &state).len());
    }

    /// Property: ties keep their filtered order.
    #[test]
    fn sort_is_stable(catalog in arb_catalog(), state in arb_state()) {
        let filtered_order: Vec<u32> = catalog
            .iter()
            .filter(|p| facets::matches(p, &state))
            .map(|p| p.id)
            .collect();

        let sorted = apply_filters(&catalog, &state);
        let position = |id: u32| filtered_order.iter().position(|&x| x == id);

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let tie = match state.sort.key {
                SortKey::Name => a.name.to_lowercase() == b.name.to_lowercase(),
                SortKey::Category => a.category.to_lowercase() == b.category.to_lowercase(),
                SortKey::Price => a.price.unwrap_or(0.0) == b.price.unwrap_or(0.0),
                SortKey::Rating => a.rating.unwrap_or(0.0) == b.rating.unwrap_or(0.0),
            };
            if tie {
                prop_assert!(position(a.id) < position(b.id));
            }
        }
    }

    /// Property: an option's count is the result size once it is the
    /// only selection of its group.
    #[test]
    fn counts_preview_exclusive_selection(catalog in arb_catalog(), state in arb_state()) {
        let facet_set = recompute_counts(&catalog, &state);
        for group in FacetGroup::OPTION_GROUPS {
            for option in facet_set.options(group) {
                let exclusive = state.with_exclusive_selection(group, &option.id);
                prop_assert_eq!(option.count, apply_filters(&catalog, &exclusive).len());
            }
        }
    }

    /// Property: a rating option's count is the result size once its
    /// threshold is the minimum rating.
    #[test]
    fn rating_counts_preview_threshold(catalog in arb_catalog(), state in arb_state()) {
        let facet_set = recompute_counts(&catalog, &state);
        for option in &facet_set.ratings {
            let mut at_threshold = state.clone();
            at_threshold.set_min_rating(option.threshold);
            prop_assert_eq!(option.count, apply_filters(&catalog, &at_threshold).len());
        }
    }
}
