//! Weighted random choice over a trait's variants.

use rand::Rng;

use crate::error::Result;
use crate::types::TraitDef;

/// Samples a trait's variants in proportion to their weights.
///
/// Holds the cumulative weight table; a draw in `[0, total)` selects the
/// first variant whose cumulative weight exceeds it. Zero-weight variants
/// are never selected.
#[derive(Debug, Clone)]
pub struct WeightedPicker<'a> {
    variants: Vec<&'a str>,
    cumulative: Vec<u64>,
    total: u64,
}

impl<'a> WeightedPicker<'a> {
    pub fn new(def: &'a TraitDef) -> Result<Self> {
        def.check()?;

        let mut total = 0u64;
        let cumulative = def
            .weights
            .iter()
            .map(|&w| {
                total += u64::from(w);
                total
            })
            .collect();

        Ok(Self {
            variants: def.variants.iter().map(String::as_str).collect(),
            cumulative,
            total,
        })
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Variant index selected by a draw in `[0, total)`.
    pub fn index_for(&self, draw: u64) -> usize {
        self.cumulative.partition_point(|&c| c <= draw)
    }

    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index_for(rng.random_range(0..self.total))
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a str {
        self.variants[self.pick_index(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_index_for_boundaries() {
        let def = TraitDef::new("Background", vec!["A", "B", "C"], vec![20, 30, 50]);
        let picker = WeightedPicker::new(&def).unwrap();

        assert_eq!(picker.total(), 100);
        assert_eq!(picker.index_for(0), 0);
        assert_eq!(picker.index_for(19), 0);
        assert_eq!(picker.index_for(20), 1);
        assert_eq!(picker.index_for(49), 1);
        assert_eq!(picker.index_for(50), 2);
        assert_eq!(picker.index_for(99), 2);
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let def = TraitDef::new("Hat", vec!["None", "Crown", "Bow"], vec![0, 1, 0]);
        let picker = WeightedPicker::new(&def).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            assert_eq!(picker.pick(&mut rng), "Crown");
        }
    }

    #[test]
    fn test_rejects_malformed_trait() {
        let def = TraitDef::new("Hat", vec!["Crown"], vec![1, 2]);
        assert!(WeightedPicker::new(&def).is_err());
    }

    #[test]
    fn test_distribution_matches_weights() {
        // Chi-squared goodness of fit, 5 degrees of freedom.
        // Critical value at p = 0.001 is 20.515.
        let weights = vec![20u32, 20, 20, 20, 10, 10];
        let def = TraitDef::new(
            "Background",
            vec!["Green", "Orange", "Purple", "Red", "White", "Yellow"],
            weights.clone(),
        );
        let picker = WeightedPicker::new(&def).unwrap();
        let mut rng = StdRng::seed_from_u64(0x5EED);

        let draws = 10_000;
        let mut observed = vec![0u64; weights.len()];
        for _ in 0..draws {
            observed[picker.pick_index(&mut rng)] += 1;
        }

        let chi2: f64 = observed
            .iter()
            .zip(&weights)
            .map(|(&o, &w)| {
                let expected = draws as f64 * f64::from(w) / 100.0;
                (o as f64 - expected).powi(2) / expected
            })
            .sum();

        assert!(chi2 < 20.515, "chi-squared {} too large: {:?}", chi2, observed);
    }
}
