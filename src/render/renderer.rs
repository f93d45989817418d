//! Turns combinations into flattened images.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{RgbImage, RgbaImage};
use rayon::prelude::*;

use crate::error::{MixError, Result};
use crate::types::{Colour, Combination, ExportRecord};

use super::compositor::{composite_over, flatten};
use super::png::write_png;
use super::LayerSet;

/// Stacks a combination's layers bottom-up and flattens the result.
pub struct LayerRenderer<'a> {
    layers: &'a LayerSet,
    background: Option<Colour>,
}

impl<'a> LayerRenderer<'a> {
    pub fn new(layers: &'a LayerSet) -> Self {
        Self {
            layers,
            background: None,
        }
    }

    /// Flatten onto an opaque colour instead of dropping alpha.
    pub fn with_background(mut self, background: Option<Colour>) -> Self {
        self.background = background;
        self
    }

    /// Composite the layers in trait order, first trait at the bottom.
    pub fn compose(&self, combo: &Combination) -> Result<RgbaImage> {
        let mut picks = combo.iter();
        let Some((base_trait, base_variant)) = picks.next() else {
            return Err(MixError::config("Cannot render a combination with no traits"));
        };

        let mut canvas = self.layers.get(base_trait, base_variant)?.clone();

        for (trait_name, variant) in picks {
            let layer = self.layers.get(trait_name, variant)?;
            if layer.dimensions() != canvas.dimensions() {
                let (lw, lh) = layer.dimensions();
                let (cw, ch) = canvas.dimensions();
                return Err(MixError::Asset {
                    trait_name: trait_name.to_string(),
                    variant: variant.to_string(),
                    message: format!("layer is {}x{} but the layers below are {}x{}", lw, lh, cw, ch),
                    help: Some("All component images must share the same size".to_string()),
                });
            }
            composite_over(&mut canvas, layer);
        }

        Ok(canvas)
    }

    /// Composite and flatten to an opaque image.
    pub fn render(&self, combo: &Combination) -> Result<RgbImage> {
        Ok(flatten(&self.compose(combo)?, self.background))
    }

    /// Render a record into `dir` under its file name.
    pub fn render_to(&self, record: &ExportRecord, dir: &Path) -> Result<PathBuf> {
        let img = self.render(&record.traits)?;
        let path = dir.join(&record.file);
        write_png(&img, &path)?;
        Ok(path)
    }

    /// Render every record across the rayon pool.
    ///
    /// `on_done` receives the number of finished records. The first
    /// failure in record order is returned.
    pub fn render_all_parallel<F>(&self, records: &[ExportRecord], dir: &Path, on_done: F) -> Result<()>
    where
        F: Fn(usize) + Sync,
    {
        let done = AtomicUsize::new(0);
        let results: Vec<Result<PathBuf>> = records
            .par_iter()
            .map(|record| {
                let result = self.render_to(record, dir);
                on_done(done.fetch_add(1, Ordering::Relaxed) + 1);
                result
            })
            .collect();

        results.into_iter().try_for_each(|r| r.map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn layers() -> LayerSet {
        let mut set = LayerSet::new();
        set.insert("Red", RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
        set.insert("Blue", RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])));
        set.insert("Hole", RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
        set.insert("Big", RgbaImage::from_pixel(3, 3, Rgba([0, 255, 0, 255])));
        set
    }

    fn combo(pairs: &[(&str, &str)]) -> Combination {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_blue_over_red_is_blue() {
        let set = layers();
        let renderer = LayerRenderer::new(&set);

        let img = renderer
            .render(&combo(&[("Background", "Red"), ("Shape", "Blue")]))
            .unwrap();

        assert_eq!(img.dimensions(), (2, 2));
        for p in img.pixels() {
            assert_eq!(p.0, [0, 0, 255]);
        }
    }

    #[test]
    fn test_layer_order_matters() {
        let set = layers();
        let renderer = LayerRenderer::new(&set);

        let img = renderer
            .render(&combo(&[("Background", "Blue"), ("Shape", "Red")]))
            .unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_transparent_base_flattens_to_black() {
        let set = layers();
        let img = LayerRenderer::new(&set)
            .render(&combo(&[("Background", "Hole")]))
            .unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);

        let img = LayerRenderer::new(&set)
            .with_background(Some(Colour::WHITE))
            .render(&combo(&[("Background", "Hole")]))
            .unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_dimension_mismatch_names_trait() {
        let set = layers();
        let err = LayerRenderer::new(&set)
            .render(&combo(&[("Background", "Red"), ("Hat", "Big")]))
            .unwrap_err();

        match err {
            MixError::Asset { trait_name, variant, .. } => {
                assert_eq!(trait_name, "Hat");
                assert_eq!(variant, "Big");
            }
            other => panic!("expected asset error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_combination_is_rejected() {
        let set = layers();
        assert!(LayerRenderer::new(&set).compose(&Combination::new()).is_err());
    }

    #[test]
    fn test_render_all_parallel_writes_every_file() {
        let set = layers();
        let renderer = LayerRenderer::new(&set);
        let dir = tempdir().unwrap();

        let records: Vec<ExportRecord> = (1..=6)
            .map(|i| ExportRecord {
                index: i,
                file: format!("{}.png", i),
                name: format!("Test #{}", i),
                description: String::new(),
                traits: combo(&[("Background", if i % 2 == 0 { "Red" } else { "Blue" })]),
            })
            .collect();

        let finished = AtomicUsize::new(0);
        renderer
            .render_all_parallel(&records, dir.path(), |_| {
                finished.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();

        assert_eq!(finished.load(Ordering::Relaxed), 6);
        for i in 1..=6 {
            assert!(dir.path().join(format!("{}.png", i)).exists());
        }
    }
}
