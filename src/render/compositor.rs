//! Source-over alpha compositing and flattening.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::types::Colour;

/// Blend `src` over `dst` in place ("over" with straight alpha).
///
/// Both images must share dimensions; the caller checks this so the
/// error can name the offending trait.
pub fn composite_over(dst: &mut RgbaImage, src: &RgbaImage) {
    debug_assert_eq!(dst.dimensions(), src.dimensions());

    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        *d = over(*d, *s);
    }
}

/// Blend a single pixel.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 || dst[3] == 0 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);
    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = src[c] as f32;
        let dc = dst[c] as f32;
        let blended = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        out[c] = blended.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;

    Rgba(out)
}

/// Drop the alpha channel.
///
/// With no background the colour channels are kept as stored, which is
/// how a plain RGBA to RGB conversion behaves. With a background the
/// composite is first blended over that opaque colour.
pub fn flatten(img: &RgbaImage, background: Option<Colour>) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut out = RgbImage::new(width, height);

    for (o, p) in out.pixels_mut().zip(img.pixels()) {
        let [r, g, b, a] = p.0;
        *o = match background {
            None => Rgb([r, g, b]),
            Some(bg) => {
                let under = Rgba([bg.r, bg.g, bg.b, 255]);
                let blended = over(under, Rgba([r, g, b, a]));
                Rgb([blended[0], blended[1], blended[2]])
            }
        };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    #[test]
    fn test_opaque_source_replaces() {
        let mut red = solid(2, 2, [255, 0, 0, 255]);
        let blue = solid(2, 2, [0, 0, 255, 255]);

        composite_over(&mut red, &blue);

        for p in red.pixels() {
            assert_eq!(p.0, [0, 0, 255, 255]);
        }
    }

    #[test]
    fn test_transparent_source_keeps_destination() {
        let mut red = solid(1, 1, [255, 0, 0, 255]);
        let clear = solid(1, 1, [0, 255, 0, 0]);

        composite_over(&mut red, &clear);
        assert_eq!(red.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let out = over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(out.0, [128, 128, 128, 255]);
    }

    #[test]
    fn test_alpha_accumulates() {
        let out = over(Rgba([255, 0, 0, 128]), Rgba([0, 0, 255, 128]));
        // 0.502 + 0.502 * 0.498 = 0.752
        assert_eq!(out[3], 192);
        assert!(out[2] > out[0]);
    }

    #[test]
    fn test_flatten_drops_alpha_verbatim() {
        let img = solid(1, 1, [10, 20, 30, 0]);
        let flat = flatten(&img, None);
        assert_eq!(flat.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_flatten_onto_background() {
        let img = solid(1, 1, [10, 20, 30, 0]);
        let flat = flatten(&img, Some(Colour::WHITE));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);

        let opaque = solid(1, 1, [10, 20, 30, 255]);
        let flat = flatten(&opaque, Some(Colour::WHITE));
        assert_eq!(flat.get_pixel(0, 0).0, [10, 20, 30]);
    }
}
