//! Trait definitions: a named layer with weighted variants.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{MixError, Result};

/// A named category of visual variation.
///
/// Traits are listed in draw order, which is also the compositing order:
/// the first trait is the bottom layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTrait")]
pub struct TraitDef {
    pub name: String,
    pub variants: Vec<String>,
    /// Parallel to `variants`. Conventionally sums to 100, not enforced.
    pub weights: Vec<u32>,
}

impl TraitDef {
    pub fn new<S: Into<String>>(name: impl Into<String>, variants: Vec<S>, weights: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
            weights,
        }
    }

    /// A trait whose variants are all equally likely.
    pub fn uniform<S: Into<String>>(name: impl Into<String>, variants: Vec<S>) -> Self {
        let weights = vec![1; variants.len()];
        Self::new(name, variants, weights)
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }

    /// Variants that can actually be drawn (non-zero weight).
    pub fn reachable(&self) -> impl Iterator<Item = (&str, u32)> {
        self.variants
            .iter()
            .zip(&self.weights)
            .filter(|&(_, &w)| w > 0)
            .map(|(v, &w)| (v.as_str(), w))
    }

    /// Reachable variant names with their combined weight, in first-seen
    /// order. A name listed more than once is one outcome, not several.
    pub fn outcomes(&self) -> Vec<(&str, u64)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut outcomes: Vec<(&str, u64)> = Vec::new();
        for (name, weight) in self.reachable() {
            match index.get(name) {
                Some(&i) => outcomes[i].1 += u64::from(weight),
                None => {
                    index.insert(name, outcomes.len());
                    outcomes.push((name, u64::from(weight)));
                }
            }
        }
        outcomes
    }

    /// Check the structural invariants needed before sampling.
    pub fn check(&self) -> Result<()> {
        if self.variants.is_empty() {
            return Err(MixError::Config {
                message: format!("Trait '{}' has no variants", self.name),
                help: None,
            });
        }
        if self.variants.len() != self.weights.len() {
            return Err(MixError::Config {
                message: format!(
                    "Trait '{}' has {} variants but {} weights",
                    self.name,
                    self.variants.len(),
                    self.weights.len()
                ),
                help: Some("Give every variant exactly one weight".to_string()),
            });
        }
        if self.total_weight() == 0 {
            return Err(MixError::Config {
                message: format!("Trait '{}' has a total weight of 0", self.name),
                help: Some("At least one variant needs a positive weight".to_string()),
            });
        }
        Ok(())
    }
}

/// Number of distinct combinations reachable from `traits`.
///
/// Zero-weight variants are never drawn and do not count, and a variant
/// name repeated within a trait counts once. Saturates
/// instead of overflowing for very large spaces.
pub fn combination_space(traits: &[TraitDef]) -> u128 {
    traits.iter().fold(1u128, |acc, t| {
        acc.saturating_mul(t.outcomes().len() as u128)
    })
}

/// Manifest form of a trait. Variants are either bare names with a parallel
/// `weights` list, or `{name, weight}` entries.
#[derive(Deserialize)]
struct RawTrait {
    name: String,
    variants: Vec<RawVariant>,
    #[serde(default)]
    weights: Option<Vec<u32>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVariant {
    Name(String),
    Weighted { name: String, weight: u32 },
}

impl TryFrom<RawTrait> for TraitDef {
    type Error = MixError;

    fn try_from(raw: RawTrait) -> Result<Self> {
        let inline = raw
            .variants
            .iter()
            .filter(|v| matches!(v, RawVariant::Weighted { .. }))
            .count();

        if inline > 0 && (inline != raw.variants.len() || raw.weights.is_some()) {
            return Err(MixError::Parse {
                message: format!("Trait '{}' mixes inline and list weights", raw.name),
                help: Some(
                    "Use either `weights: [...]` or `{ name, weight }` entries, not both"
                        .to_string(),
                ),
            });
        }

        let mut variants = Vec::with_capacity(raw.variants.len());
        let mut inline_weights = Vec::with_capacity(inline);
        for v in raw.variants {
            match v {
                RawVariant::Name(name) => variants.push(name),
                RawVariant::Weighted { name, weight } => {
                    variants.push(name);
                    inline_weights.push(weight);
                }
            }
        }

        let weights = match raw.weights {
            Some(w) => w,
            None if inline > 0 => inline_weights,
            None => vec![1; variants.len()],
        };

        Ok(Self {
            name: raw.name,
            variants,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accepts_valid_trait() {
        let t = TraitDef::new("Background", vec!["Red", "Blue"], vec![70, 30]);
        assert!(t.check().is_ok());
        assert_eq!(t.total_weight(), 100);
    }

    #[test]
    fn test_check_rejects_length_mismatch() {
        let t = TraitDef::new("Hat", vec!["Cap", "Crown"], vec![100]);
        let err = t.check().unwrap_err();
        assert!(matches!(err, MixError::Config { .. }));
        assert!(err.to_string().contains("Hat"));
    }

    #[test]
    fn test_check_rejects_zero_total() {
        let t = TraitDef::new("Eye", vec!["Left"], vec![0]);
        assert!(t.check().is_err());
    }

    #[test]
    fn test_check_rejects_empty() {
        let t = TraitDef::new::<String>("Eye", vec![], vec![]);
        assert!(t.check().is_err());
    }

    #[test]
    fn test_space_skips_zero_weights() {
        let traits = vec![
            TraitDef::new("Background", vec!["A", "B", "C"], vec![1, 0, 1]),
            TraitDef::uniform("Shape", vec!["X", "Y"]),
        ];
        assert_eq!(combination_space(&traits), 4);
    }

    #[test]
    fn test_space_counts_repeated_variant_once() {
        let traits = vec![
            TraitDef::new("Background", vec!["Red", "Red"], vec![50, 50]),
            TraitDef::uniform("Shape", vec!["X", "Y"]),
        ];
        assert_eq!(combination_space(&traits), 2);
        assert_eq!(traits[0].outcomes(), vec![("Red", 100)]);
    }

    #[test]
    fn test_space_saturates() {
        let wide: Vec<String> = (0..1000).map(|i| i.to_string()).collect();
        let traits: Vec<TraitDef> = (0..20)
            .map(|i| TraitDef::uniform(format!("T{}", i), wide.clone()))
            .collect();
        assert_eq!(combination_space(&traits), u128::MAX);
    }

    #[test]
    fn test_deserialize_parallel_weights() {
        let t: TraitDef =
            serde_yaml::from_str("name: Base\nvariants: [Blue Body, Green Body]\nweights: [25, 75]")
                .unwrap();
        assert_eq!(t.variants, vec!["Blue Body", "Green Body"]);
        assert_eq!(t.weights, vec![25, 75]);
    }

    #[test]
    fn test_deserialize_inline_weights() {
        let yaml = r#"
name: Hat
variants:
  - { name: Crown, weight: 10 }
  - { name: None Hat, weight: 90 }
"#;
        let t: TraitDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(t.variants, vec!["Crown", "None Hat"]);
        assert_eq!(t.weights, vec![10, 90]);
    }

    #[test]
    fn test_deserialize_defaults_to_uniform() {
        let t: TraitDef = serde_yaml::from_str("name: Eye\nvariants: [Fire, Gold, Love]").unwrap();
        assert_eq!(t.weights, vec![1, 1, 1]);
    }

    #[test]
    fn test_deserialize_rejects_mixed_forms() {
        let yaml = r#"
name: Hat
variants:
  - Crown
  - { name: Bow, weight: 10 }
"#;
        assert!(serde_yaml::from_str::<TraitDef>(yaml).is_err());
    }

    #[test]
    fn test_deserialize_keeps_length_mismatch_for_validation() {
        let t: TraitDef =
            serde_yaml::from_str("name: Eye\nvariants: [Fire, Gold]\nweights: [1]").unwrap();
        assert!(t.check().is_err());
    }
}
