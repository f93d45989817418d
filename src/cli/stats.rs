//! Stats command implementation.
//!
//! Generates the combinations without rendering and compares how often each
//! variant was drawn against its configured weight.

use clap::Args;

use crate::error::Result;
use crate::generate::{all_unique, make_rng, Generator};
use crate::output::{plural, Printer};
use crate::types::{Combination, TraitDef};
use crate::validation::require_valid_config;

use super::ManifestArgs;

/// Generate combinations only and report rarity statistics
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub collection: ManifestArgs,
}

/// Observed frequency of one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantStats {
    pub variant: String,
    pub count: usize,
    /// Share of the collection, 0-100.
    pub observed: f64,
    /// Share implied by the weights, 0-100.
    pub expected: f64,
}

/// Frequencies for every variant of every trait, in manifest order.
pub fn variant_frequencies(
    traits: &[TraitDef],
    combos: &[Combination],
) -> Vec<(String, Vec<VariantStats>)> {
    traits
        .iter()
        .map(|t| {
            let total = t.total_weight().max(1) as f64;
            let stats = t
                .variants
                .iter()
                .zip(&t.weights)
                .map(|(variant, &weight)| {
                    let count = combos
                        .iter()
                        .filter(|c| c.get(&t.name) == Some(variant.as_str()))
                        .count();
                    let observed = if combos.is_empty() {
                        0.0
                    } else {
                        100.0 * count as f64 / combos.len() as f64
                    };
                    VariantStats {
                        variant: variant.clone(),
                        count,
                        observed,
                        expected: 100.0 * f64::from(weight) / total,
                    }
                })
                .collect();
            (t.name.clone(), stats)
        })
        .collect()
}

pub fn run(args: StatsArgs, printer: &Printer) -> Result<()> {
    let manifest = args.collection.load()?;
    require_valid_config(&manifest, printer)?;

    let mut generator = Generator::new(&manifest.traits)?;
    if let Some(retries) = manifest.max_retries {
        generator = generator.with_max_retries(retries);
    }
    let combos = generator.generate(manifest.count, &mut make_rng(manifest.seed))?;

    printer.status(
        "Generated",
        &format!(
            "{} of {} possible",
            plural(combos.len(), "combination", "combinations"),
            generator.space()
        ),
    );

    for (trait_name, stats) in variant_frequencies(&manifest.traits, &combos) {
        println!("{}", trait_name);
        let width = stats.iter().map(|s| s.variant.len()).max().unwrap_or(0);
        for s in stats {
            println!(
                "  {:<width$}  {:>6}  {:>6.2}%  (weight {:.2}%)",
                s.variant, s.count, s.observed, s.expected
            );
        }
    }

    printer.info("Unique", &all_unique(&combos).to_string());
    Ok(())
}
