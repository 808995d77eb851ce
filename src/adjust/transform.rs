use image::RgbaImage;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::{AdjustParams, Param};

/// Contrast percentage at which the multiplier formula divides by zero.
const CONTRAST_POLE: f32 = 259.0 + 100.0;

/// Contrast multiplier for a contrast percentage (100 = unchanged).
///
/// Uses the classic `259 * (k + 255) / (255 * (259 - k))` curve with
/// `k = contrast - 100`, so 0% flattens toward mid-grey and 200% roughly
/// quadruples the distance from 128. Returns `None` at the pole
/// (`contrast == 359`), which lies outside the slider domain.
pub fn contrast_factor(contrast: f32) -> Option<f32> {
    if contrast == CONTRAST_POLE {
        return None;
    }
    let k = contrast - 100.0;
    Some((259.0 * (k + 255.0)) / (255.0 * (259.0 - k)))
}

/// Per-transform constants, computed once instead of per pixel.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    brightness: f32,
    factor: f32,
    mix: f32,
}

impl Coefficients {
    fn new(params: &AdjustParams) -> Self {
        let range = Param::Contrast.range();
        let contrast = params.contrast.clamp(*range.start(), *range.end());
        Self {
            brightness: params.brightness,
            // Pole is outside the clamped domain.
            factor: contrast_factor(contrast).unwrap_or(1.0),
            mix: params.mix / 100.0,
        }
    }

    #[inline]
    fn apply(&self, px: &mut [u8]) {
        let mut rgb = [0.0f32; 3];
        for (c, v) in rgb.iter_mut().enumerate() {
            let scaled = px[c] as f32 * self.brightness / 100.0;
            *v = self.factor * (scaled - 128.0) + 128.0;
        }

        let gray = (rgb[0] + rgb[1] + rgb[2]) / 3.0;
        for (c, v) in rgb.iter().enumerate() {
            let mixed = v * (1.0 - self.mix) + gray * self.mix;
            px[c] = mixed.clamp(0.0, 255.0).round_ties_even() as u8;
        }
        // px[3] (alpha) untouched
    }
}

/// Adjust a single RGBA pixel.
pub fn adjust_pixel(px: [u8; 4], params: &AdjustParams) -> [u8; 4] {
    let mut out = px;
    Coefficients::new(params).apply(&mut out);
    out
}

/// Apply brightness, contrast and grayscale mix to an RGBA buffer in place.
///
/// Panics if the buffer length is not a multiple of 4.
pub fn transform_in_place(pixels: &mut [u8], params: &AdjustParams) {
    assert!(
        pixels.len() % 4 == 0,
        "RGBA buffer length {} is not a multiple of 4",
        pixels.len()
    );
    if params.is_neutral() {
        return;
    }
    let coeffs = Coefficients::new(params);

    #[cfg(not(target_arch = "wasm32"))]
    pixels.par_chunks_exact_mut(4).for_each(|px| coeffs.apply(px));

    #[cfg(target_arch = "wasm32")]
    pixels.chunks_exact_mut(4).for_each(|px| coeffs.apply(px));
}

/// Allocating form of [`transform_in_place`]; the input is left untouched.
pub fn transform(pixels: &[u8], params: &AdjustParams) -> Vec<u8> {
    let mut out = pixels.to_vec();
    transform_in_place(&mut out, params);
    out
}

pub fn transform_image(source: &RgbaImage, params: &AdjustParams) -> RgbaImage {
    let mut out = source.clone();
    transform_in_place(&mut out, params);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pixels() -> Vec<u8> {
        let mut v = Vec::new();
        for r in (0..=255u16).step_by(51) {
            for g in (0..=255u16).step_by(85) {
                for b in [0u16, 17, 128, 254, 255] {
                    v.extend_from_slice(&[r as u8, g as u8, b as u8, (r ^ b) as u8]);
                }
            }
        }
        v
    }

    #[test]
    fn neutral_contrast_factor_is_one() {
        assert_eq!(contrast_factor(100.0), Some(1.0));
        assert!(contrast_factor(0.0).unwrap() < 1.0);
        assert!(contrast_factor(200.0).unwrap() > 1.0);
        assert_eq!(contrast_factor(CONTRAST_POLE), None);
    }

    #[test]
    fn neutral_params_are_identity() {
        let input = sample_pixels();
        // Bypass the neutral shortcut to check the arithmetic itself.
        let coeffs = Coefficients::new(&AdjustParams::default());
        let mut out = input.clone();
        out.chunks_exact_mut(4).for_each(|px| coeffs.apply(px));
        assert_eq!(out, input);
        assert_eq!(transform(&input, &AdjustParams::default()), input);
    }

    #[test]
    fn brightness_scenario() {
        let params = AdjustParams::new(150.0, 100.0, 0.0);
        assert_eq!(adjust_pixel([200, 100, 50, 255], &params), [255, 150, 75, 255]);
        // 4.5 -> 4, 7.5 -> 8, 40.5 -> 40
        assert_eq!(adjust_pixel([3, 5, 27, 9], &params), [4, 8, 40, 9]);
    }

    #[test]
    fn full_mix_is_grayscale() {
        let params = AdjustParams::new(130.0, 140.0, 100.0);
        let out = transform(&sample_pixels(), &params);
        for px in out.chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn zero_brightness_is_black() {
        let input = sample_pixels();
        for contrast in [100.0, 150.0, 200.0] {
            for mix in [0.0, 50.0, 100.0] {
                let out = transform(&input, &AdjustParams::new(0.0, contrast, mix));
                for (o, i) in out.chunks_exact(4).zip(input.chunks_exact(4)) {
                    assert_eq!(&o[..3], &[0, 0, 0]);
                    assert_eq!(o[3], i[3]);
                }
            }
        }
    }

    #[test]
    fn alpha_passes_through() {
        let input = sample_pixels();
        let out = transform(&input, &AdjustParams::new(37.0, 181.0, 63.0));
        for (o, i) in out.chunks_exact(4).zip(input.chunks_exact(4)) {
            assert_eq!(o[3], i[3]);
        }
    }

    #[test]
    fn low_contrast_pulls_toward_mid_grey() {
        let params = AdjustParams::new(100.0, 0.0, 0.0);
        let [r, g, b, _] = adjust_pixel([0, 128, 255, 255], &params);
        assert!(r > 0 && r < 128);
        assert_eq!(g, 128);
        assert!(b > 128 && b < 255);
    }

    #[test]
    fn extremes_stay_in_range() {
        // u8 output cannot leave [0, 255]; this checks nothing panics on the
        // corners of the domain and that the corners do something sensible.
        let input = sample_pixels();
        for &b in &[0.0, 200.0] {
            for &c in &[0.0, 200.0] {
                for &m in &[0.0, 100.0] {
                    let out = transform(&input, &AdjustParams::new(b, c, m));
                    assert_eq!(out.len(), input.len());
                }
            }
        }
        let white = adjust_pixel([255, 255, 255, 255], &AdjustParams::new(200.0, 200.0, 0.0));
        assert_eq!(white, [255, 255, 255, 255]);
    }

    #[test]
    fn not_idempotent_for_non_neutral_params() {
        let params = AdjustParams::new(150.0, 100.0, 0.0);
        let input = vec![100, 100, 100, 255];
        let once = transform(&input, &params);
        let twice = transform(&once, &params);
        assert_eq!(once, vec![150, 150, 150, 255]);
        assert_eq!(twice, vec![225, 225, 225, 255]);
        assert_ne!(once, twice);
    }

    #[test]
    fn deterministic() {
        let input = sample_pixels();
        let params = AdjustParams::new(88.0, 133.0, 27.0);
        assert_eq!(transform(&input, &params), transform(&input, &params));
    }

    #[test]
    fn transform_image_keeps_dimensions() {
        let src = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 40]));
        let out = transform_image(&src, &AdjustParams::new(200.0, 100.0, 0.0));
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.get_pixel(2, 1).0, [20, 40, 60, 40]);
        assert_eq!(src.get_pixel(0, 0).0, [10, 20, 30, 40]);
    }

    #[test]
    #[should_panic(expected = "not a multiple of 4")]
    fn malformed_buffer_panics() {
        transform(&[1, 2, 3], &AdjustParams::new(120.0, 100.0, 0.0));
    }
}
