//! A full assignment of one variant to every trait.

use std::fmt;

/// One chosen variant per trait, kept in trait-definition order.
///
/// Equality is structural: two combinations are equal when every
/// trait maps to the same variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Combination {
    picks: Vec<(String, String)>,
}

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            picks: Vec::with_capacity(n),
        }
    }

    /// Record the variant chosen for a trait.
    pub fn push(&mut self, trait_name: impl Into<String>, variant: impl Into<String>) {
        self.picks.push((trait_name.into(), variant.into()));
    }

    /// Look up the variant chosen for `trait_name`.
    pub fn get(&self, trait_name: &str) -> Option<&str> {
        self.picks
            .iter()
            .find(|(t, _)| t == trait_name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(trait, variant)` pairs in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.picks.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

impl<T: Into<String>, V: Into<String>> FromIterator<(T, V)> for Combination {
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iter: I) -> Self {
        Self {
            picks: iter
                .into_iter()
                .map(|(t, v)| (t.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (t, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", t, v)?;
        }
        Ok(())
    }
}
