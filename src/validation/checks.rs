//! Validation checks for a collection manifest.
//!
//! Each check takes a `&Manifest` and returns a `ValidationResult`.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::config::Manifest;

use super::warning::{Diagnostic, ValidationResult};

/// Weight total the rarity tables are usually written against.
const CONVENTIONAL_TOTAL: u64 = 100;

/// Structural problems in the trait list.
pub fn check_traits(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();

    if manifest.traits.is_empty() {
        result.push(
            Diagnostic::error("traitmix::validate::no-traits", "No traits configured")
                .with_help("Add at least one entry under `traits:`"),
        );
        return result;
    }

    let mut names = HashSet::new();
    for t in &manifest.traits {
        if !names.insert(t.name.as_str()) {
            result.push(Diagnostic::error(
                "traitmix::validate::duplicate-trait",
                format!("Trait '{}' is defined more than once", t.name),
            ));
        }

        if t.variants.is_empty() {
            result.push(Diagnostic::error(
                "traitmix::validate::empty-trait",
                format!("Trait '{}' has no variants", t.name),
            ));
            continue;
        }

        if t.variants.len() != t.weights.len() {
            result.push(
                Diagnostic::error(
                    "traitmix::validate::weight-count",
                    format!(
                        "Trait '{}' has {} variants but {} weights",
                        t.name,
                        t.variants.len(),
                        t.weights.len()
                    ),
                )
                .with_help("Give every variant exactly one weight"),
            );
            continue;
        }

        let total = t.total_weight();
        if total == 0 {
            result.push(Diagnostic::error(
                "traitmix::validate::zero-total",
                format!("Trait '{}' has a total weight of 0", t.name),
            ));
        } else if total != CONVENTIONAL_TOTAL {
            result.push(
                Diagnostic::warning(
                    "traitmix::validate::weight-total",
                    format!("Trait '{}' weights sum to {}, not {}", t.name, total, CONVENTIONAL_TOTAL),
                )
                .with_help("Weights are relative, so this only matters if you read them as percentages"),
            );
        }

        let mut variants = HashSet::new();
        for (variant, &weight) in t.variants.iter().zip(&t.weights) {
            if !variants.insert(variant.as_str()) {
                result.push(Diagnostic::warning(
                    "traitmix::validate::duplicate-variant",
                    format!("Trait '{}' lists variant '{}' twice", t.name, variant),
                ));
            }
            if weight == 0 {
                result.push(Diagnostic::warning(
                    "traitmix::validate::unreachable-variant",
                    format!("Variant '{}' of trait '{}' has weight 0 and is never drawn", variant, t.name),
                ));
            }
        }
    }

    result
}

/// Variants that share a name across traits also share a component file.
pub fn check_shared_variants(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for t in &manifest.traits {
        for variant in &t.variants {
            match owners.get(variant.as_str()) {
                Some(&owner) if owner != t.name => {
                    result.push(
                        Diagnostic::warning(
                            "traitmix::validate::shared-variant",
                            format!(
                                "Variant '{}' appears in traits '{}' and '{}'",
                                variant, owner, t.name
                            ),
                        )
                        .with_help("Both traits will draw the same component file"),
                    );
                }
                Some(_) => {}
                None => {
                    owners.insert(variant.as_str(), t.name.as_str());
                }
            }
        }
    }

    result
}

/// Count, delimiter and other collection-level settings.
pub fn check_settings(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();

    if matches!(manifest.delimiter, '"' | '\r' | '\n') {
        result.push(
            Diagnostic::error(
                "traitmix::validate::delimiter",
                format!("Unusable metadata delimiter {:?}", manifest.delimiter),
            )
            .with_help("Pick a delimiter other than a quote or line break"),
        );
    }

    if !manifest.traits.is_empty() && manifest.traits.iter().all(|t| t.check().is_ok()) {
        let space = manifest.space();
        if manifest.count as u128 > space {
            result.push(
                Diagnostic::error(
                    "traitmix::validate::count",
                    format!(
                        "Requested {} images but only {} unique combinations exist",
                        manifest.count, space
                    ),
                )
                .with_help("Lower `count` or add more variants"),
            );
        }
    }

    if manifest.count == 0 {
        result.push(Diagnostic::warning(
            "traitmix::validate::empty-collection",
            "`count` is 0, the collection will be empty",
        ));
    }

    result
}

/// Every variant has a readable component image and all images share a size.
pub fn check_assets(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut reference: Option<((u32, u32), String)> = None;
    let mut checked = HashSet::new();

    for t in &manifest.traits {
        for variant in &t.variants {
            if !checked.insert(variant.as_str()) {
                continue;
            }

            let path = manifest.layer_path(variant);
            if !path.is_file() {
                result.push(
                    Diagnostic::error(
                        "traitmix::validate::missing-layer",
                        format!(
                            "Trait '{}' variant '{}': missing {}",
                            t.name,
                            variant,
                            path.display()
                        ),
                    )
                    .with_help("Component files are named after their variant"),
                );
                continue;
            }

            let dims = match image::image_dimensions(&path) {
                Ok(dims) => dims,
                Err(e) => {
                    result.push(Diagnostic::error(
                        "traitmix::validate::unreadable-layer",
                        format!("Trait '{}' variant '{}': {}", t.name, variant, e),
                    ));
                    continue;
                }
            };

            match &reference {
                None => reference = Some((dims, variant.clone())),
                Some((expected, first)) if *expected != dims => {
                    result.push(
                        Diagnostic::error(
                            "traitmix::validate::layer-size",
                            format!(
                                "Trait '{}' variant '{}' is {}x{} but '{}' is {}x{}",
                                t.name, variant, dims.0, dims.1, first, expected.0, expected.1
                            ),
                        )
                        .with_help("All component images must share the same size"),
                    );
                }
                Some(_) => {}
            }
        }
    }

    result
}

/// Component files that no variant refers to.
pub fn check_unused_components(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !manifest.components.is_dir() {
        result.push(Diagnostic::error(
            "traitmix::validate::components-dir",
            format!(
                "Components directory {} does not exist",
                manifest.components.display()
            ),
        ));
        return result;
    }

    let used: HashSet<PathBuf> = manifest
        .traits
        .iter()
        .flat_map(|t| t.variants.iter())
        .map(|v| manifest.layer_path(v))
        .collect();

    let mut unused: Vec<String> = WalkDir::new(&manifest.components)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext == manifest.extension.as_str())
        })
        .filter(|entry| !used.contains(entry.path()))
        .filter_map(|entry| {
            entry
                .path()
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .collect();
    unused.sort();

    for name in unused {
        result.push(Diagnostic::warning(
            "traitmix::validate::unused-component",
            format!("Component '{}' is not used by any trait", name),
        ));
    }

    result
}
