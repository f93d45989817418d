//! PNG output for flattened composites.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::{MixError, Result};

/// Write an opaque image as PNG, whatever the path's extension.
pub fn write_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| MixError::io(path, format!("Failed to write PNG: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_roundtrip_pixels() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));

        let dir = tempdir().unwrap();
        let path = dir.path().join("1.png");
        write_png(&img, &path).unwrap();

        let back = image::open(&path).unwrap();
        assert_eq!(back.color(), image::ColorType::Rgb8);
        let back = back.to_rgb8();
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(back.get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn test_write_png_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("1.png");
        let err = write_png(&RgbImage::new(1, 1), &path).unwrap_err();
        assert!(matches!(err, MixError::Io { .. }));
    }
}
