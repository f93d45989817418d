//! Collection manifest (traitmix.yaml) parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MixError, Result};
use crate::types::{combination_space, Colour, TraitDef};

/// File name of the metadata table inside the output directory.
pub const METADATA_FILENAME: &str = "metadata.csv";

/// Collection manifest loaded from traitmix.yaml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Collection name, used for each item's display name.
    pub name: String,

    /// Description shared by every item.
    pub description: String,

    /// Number of unique images to generate.
    pub count: usize,

    /// Directory holding one image per variant (`{variant}.{extension}`).
    pub components: PathBuf,

    /// Output directory. Cleared on each build.
    pub output: PathBuf,

    /// Extension of the component images.
    pub extension: String,

    /// Metadata field delimiter. Semicolon by default for the bulk minter.
    pub delimiter: char,

    /// RNG seed for reproducible collections.
    pub seed: Option<u64>,

    /// Draws allowed per accepted combination before giving up.
    pub max_retries: Option<u64>,

    /// Canvas colour to flatten onto. `None` drops alpha without blending.
    pub background: Option<Colour>,

    /// Traits in layer order, bottom first.
    pub traits: Vec<TraitDef>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: "Collection".to_string(),
            description: String::new(),
            count: 0,
            components: PathBuf::from("components"),
            output: PathBuf::from("collection"),
            extension: "png".to_string(),
            delimiter: ';',
            seed: None,
            max_retries: None,
            background: None,
            traits: vec![],
        }
    }
}

impl Manifest {
    /// Load a manifest from a traitmix.yaml file.
    ///
    /// Relative `components` and `output` paths are resolved against the
    /// manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MixError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
            help: Some("Pass --manifest or run from the collection directory".to_string()),
        })?;

        let mut manifest = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            manifest.resolve_paths(base);
        }
        Ok(manifest)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| MixError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check traitmix.yaml syntax".to_string()),
        })
    }

    /// Anchor relative directories at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.components.is_relative() {
            self.components = base.join(&self.components);
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
    }

    /// Path of the component image for a variant.
    pub fn layer_path(&self, variant: &str) -> PathBuf {
        self.components
            .join(format!("{}.{}", variant, self.extension))
    }

    /// Path of the metadata table.
    pub fn metadata_path(&self) -> PathBuf {
        self.output.join(METADATA_FILENAME)
    }

    /// Number of distinct reachable combinations.
    pub fn space(&self) -> u128 {
        combination_space(&self.traits)
    }
}
