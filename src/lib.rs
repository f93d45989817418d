//! traitmix - Layered collectible image generator
//!
//! Picks unique weighted trait combinations, composites each one from
//! per-variant component images and writes the images plus a metadata
//! table for bulk minting tools.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod output;
pub mod render;
pub mod types;
pub mod validation;

pub use cli::build::{build_collection, BuildOptions, BuildSummary};
pub use config::{Manifest, MANIFEST_FILENAME, METADATA_FILENAME};
pub use error::{MixError, Result};
pub use export::{build_records, prepare_output_dir, MetadataFile, MetadataWriter, Prepared};
pub use generate::{all_unique, first_duplicate, make_rng, Generator, WeightedPicker};
pub use render::{composite_over, flatten, write_png, LayerRenderer, LayerSet};
pub use types::{combination_space, Colour, Combination, ExportRecord, TraitDef};
pub use validation::{validate_config, validate_manifest, Diagnostic, Severity, ValidationResult};
