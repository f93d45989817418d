//! Rejection sampling for unique combinations.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{MixError, Result};
use crate::types::{combination_space, Combination, TraitDef};

use super::WeightedPicker;

/// Floor for the derived retry budget.
pub const MIN_RETRY_BUDGET: u64 = 1_000;

/// Ceiling for the derived retry budget. Past this, rare combinations
/// are treated as unreachable and the run exhausts instead of hanging.
pub const MAX_DERIVED_RETRY_BUDGET: u64 = 10_000_000;

/// Expected hits on the rarest combination within the derived budget.
/// Missing it entirely has probability below e^-64.
const RARE_HITS: f64 = 64.0;

/// Draws unique combinations from a fixed trait list.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    traits: &'a [TraitDef],
    pickers: Vec<WeightedPicker<'a>>,
    max_retries: u64,
}

impl<'a> Generator<'a> {
    /// Build a generator, checking every trait up front.
    pub fn new(traits: &'a [TraitDef]) -> Result<Self> {
        if traits.is_empty() {
            return Err(MixError::config("No traits configured"));
        }

        let pickers = traits
            .iter()
            .map(WeightedPicker::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            traits,
            pickers,
            max_retries: default_retry_budget(traits),
        })
    }

    /// Override the number of rejected draws allowed per accepted combination.
    pub fn with_max_retries(mut self, max_retries: u64) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn max_retries(&self) -> u64 {
        self.max_retries
    }

    /// Number of distinct combinations this generator can produce.
    pub fn space(&self) -> u128 {
        combination_space(self.traits)
    }

    /// Draw one combination, each trait independently by weight.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Combination {
        let mut combo = Combination::with_capacity(self.traits.len());
        for (def, picker) in self.traits.iter().zip(&self.pickers) {
            combo.push(def.name.as_str(), picker.pick(rng));
        }
        combo
    }

    /// Generate `count` distinct combinations in the order they were found.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Combination>> {
        self.generate_with(count, rng, |_| {})
    }

    /// Like [`generate`](Self::generate), calling `on_accept` with the
    /// running total after each accepted combination.
    pub fn generate_with<R, F>(&self, count: usize, rng: &mut R, mut on_accept: F) -> Result<Vec<Combination>>
    where
        R: Rng + ?Sized,
        F: FnMut(usize),
    {
        let space = self.space();
        if count as u128 > space {
            return Err(MixError::Config {
                message: format!(
                    "Requested {} images but only {} unique combinations exist",
                    count, space
                ),
                help: Some("Lower the count or add more variants".to_string()),
            });
        }

        let mut seen: HashSet<Combination> = HashSet::with_capacity(count);
        let mut accepted = Vec::with_capacity(count);

        while accepted.len() < count {
            let mut rejected = 0u64;
            loop {
                let combo = self.draw(rng);
                if !seen.contains(&combo) {
                    seen.insert(combo.clone());
                    accepted.push(combo);
                    break;
                }
                if rejected == self.max_retries {
                    return Err(MixError::Exhaustion {
                        index: accepted.len() + 1,
                        retries: rejected,
                    });
                }
                rejected += 1;
            }
            on_accept(accepted.len());
        }

        Ok(accepted)
    }
}

/// Retry budget large enough to find the least likely combination.
fn default_retry_budget(traits: &[TraitDef]) -> u64 {
    let rarest: f64 = traits
        .iter()
        .map(|t| {
            let min = t.outcomes().into_iter().map(|(_, w)| w).min().unwrap_or(0);
            min as f64 / t.total_weight().max(1) as f64
        })
        .product();

    let wanted = (RARE_HITS / rarest).ceil();
    if wanted.is_nan() || wanted >= MAX_DERIVED_RETRY_BUDGET as f64 {
        return MAX_DERIVED_RETRY_BUDGET;
    }
    (wanted as u64).max(MIN_RETRY_BUDGET)
}
