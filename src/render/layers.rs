//! Component layer loading.

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use crate::config::Manifest;
use crate::error::{MixError, Result};
use crate::types::ExportRecord;

/// Decoded component images keyed by variant name.
///
/// Every variant a collection uses is decoded once up front, so
/// rendering only reads from the set.
#[derive(Debug, Default)]
pub struct LayerSet {
    images: HashMap<String, RgbaImage>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every variant referenced by `records`.
    pub fn for_records(manifest: &Manifest, records: &[ExportRecord]) -> Result<Self> {
        let mut set = Self::new();
        for record in records {
            for (trait_name, variant) in record.traits.iter() {
                if set.images.contains_key(variant) {
                    continue;
                }
                let img = load_layer(&manifest.layer_path(variant), trait_name, variant)?;
                set.insert(variant, img);
            }
        }
        Ok(set)
    }

    pub fn insert(&mut self, variant: impl Into<String>, img: RgbaImage) {
        self.images.insert(variant.into(), img);
    }

    /// The decoded image for a variant, or an asset error naming it.
    pub fn get(&self, trait_name: &str, variant: &str) -> Result<&RgbaImage> {
        self.images.get(variant).ok_or_else(|| MixError::Asset {
            trait_name: trait_name.to_string(),
            variant: variant.to_string(),
            message: "layer was not loaded".to_string(),
            help: None,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Decode one component image as RGBA.
pub fn load_layer(path: &Path, trait_name: &str, variant: &str) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(MixError::Asset {
            trait_name: trait_name.to_string(),
            variant: variant.to_string(),
            message: format!("missing component file {}", path.display()),
            help: Some("Component files are named after their variant".to_string()),
        });
    }

    let img = image::open(path).map_err(|e| MixError::Asset {
        trait_name: trait_name.to_string(),
        variant: variant.to_string(),
        message: format!("cannot decode {}: {}", path.display(), e),
        help: None,
    })?;

    Ok(img.to_rgba8())
}
