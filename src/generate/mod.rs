//! Combination generation.
//!
//! Draws one variant per trait by weight and keeps drawing until the
//! requested number of distinct combinations exist.

mod generator;
mod unique;
mod weighted;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use generator::{Generator, MAX_DERIVED_RETRY_BUDGET, MIN_RETRY_BUDGET};
pub use unique::{all_unique, first_duplicate};
pub use weighted::WeightedPicker;

/// Build the run's RNG. A seed makes the collection reproducible.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
