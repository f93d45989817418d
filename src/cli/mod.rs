pub mod build;
pub mod completions;
pub mod stats;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Manifest, MANIFEST_FILENAME};
use crate::error::Result;

/// traitmix - Layered collectible image generator
#[derive(Parser, Debug)]
#[command(name = "traitmix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the collection images and metadata
    Build(build::BuildArgs),

    /// Check the manifest and component images without rendering
    Validate(validate::ValidateArgs),

    /// Generate combinations only and report rarity statistics
    Stats(stats::StatsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Manifest selection shared by every command that reads a collection.
#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Path to the collection manifest
    #[arg(long, short, default_value = MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// Number of images (overrides `count`)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// RNG seed (overrides `seed`)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ManifestArgs {
    /// Load the manifest and apply command-line overrides.
    pub fn load(&self) -> Result<Manifest> {
        let mut manifest = Manifest::load(&self.manifest)?;
        if let Some(count) = self.count {
            manifest.count = count;
        }
        if self.seed.is_some() {
            manifest.seed = self.seed;
        }
        Ok(manifest)
    }
}
