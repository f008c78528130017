//! Free-text search box filter.

use crate::state::FacetGroup;
use crate::traits::Filter;
use catalog::Product;

/// Keeps products where every query term appears in the name, brand,
/// category or one of the features (case-insensitive substring).
pub struct TextQueryFilter {
    terms: Vec<String>,
}

impl TextQueryFilter {
    /// `terms` are expected to be lowercased already.
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }
}

impl Filter for TextQueryFilter {
    fn name(&self) -> &str {
        "TextQueryFilter"
    }

    fn group(&self) -> FacetGroup {
        FacetGroup::Query
    }

    fn matches(&self, product: &Product) -> bool {
        let haystack: Vec<String> = [&product.name, &product.brand, &product.category]
            .into_iter()
            .chain(product.features.iter())
            .map(|field| field.to_lowercase())
            .collect();

        self.terms
            .iter()
            .all(|term| haystack.iter().any(|field| field.contains(term.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        let mut product = Product::new(1, "QuietComfort Ultra", "Audio");
        product.brand = "Bose".into();
        product.features = vec!["Noise Cancelling".into(), "Bluetooth".into()];
        product
    }

    #[test]
    fn test_terms_match_across_fields() {
        let filter = TextQueryFilter::new(vec!["bose".into(), "noise".into()]);
        assert!(filter.matches(&headphones()));
    }

    #[test]
    fn test_every_term_required() {
        let filter = TextQueryFilter::new(vec!["bose".into(), "waterproof".into()]);
        assert!(!filter.matches(&headphones()));
    }

    #[test]
    fn test_substring_match() {
        let filter = TextQueryFilter::new(vec!["comf".into()]);
        assert!(filter.matches(&headphones()));
    }
}
