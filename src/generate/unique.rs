//! Uniqueness checks over a generated collection.

use std::collections::HashSet;
use std::hash::Hash;

/// True when no two entries are structurally equal.
pub fn all_unique<T: Eq + Hash>(items: &[T]) -> bool {
    first_duplicate(items).is_none()
}

/// Index of the first entry that repeats an earlier one.
pub fn first_duplicate<T: Eq + Hash>(items: &[T]) -> Option<usize> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().position(|item| !seen.insert(item))
}
