//! Export record construction.

use crate::types::{Combination, ExportRecord};

/// Pair each combination with its 1-based file name, display name and the
/// shared description.
pub fn build_records(
    combinations: Vec<Combination>,
    collection: &str,
    description: &str,
) -> Vec<ExportRecord> {
    combinations
        .into_iter()
        .enumerate()
        .map(|(i, traits)| {
            let index = i + 1;
            ExportRecord {
                index,
                file: format!("{}.png", index),
                name: format!("{} #{}", collection, index),
                description: description.to_string(),
                traits,
            }
        })
        .collect()
}
