//! Image-to-luminance normalization
//!
//! The engine consumes exactly one pixel layout: a contiguous, row-major
//! plane of 8-bit luminance samples. This module turns any `DynamicImage`
//! into that layout, passing already-grayscale buffers through untouched.

use std::borrow::Cow;

use image::{DynamicImage, GenericImageView};

use crate::error::{ScanError, ScanResult};

// Fixed-point BT.601 luma coefficients over 16-bit channels. They sum to
// 1 << 16, so the 32-bit accumulator cannot overflow.
const LUMA_R: u32 = 19595;
const LUMA_G: u32 = 38470;
const LUMA_B: u32 = 7471;
const LUMA_ROUND: u32 = 16384;

/// Luma of one pixel from 16-bit-normalized channels.
#[inline]
fn luma16(r: u32, g: u32, b: u32) -> u8 {
    ((LUMA_R * r + LUMA_G * g + LUMA_B * b + LUMA_ROUND) >> 24) as u8
}

/// Luma of one pixel from 8-bit channels, widened to 16 bits first
/// (`v * 0x101` replicates the byte, the standard 8-to-16-bit expansion).
#[inline]
fn luma8(r: u8, g: u8, b: u8) -> u8 {
    luma16(
        u32::from(r) * 0x101,
        u32::from(g) * 0x101,
        u32::from(b) * 0x101,
    )
}

/// Convert `img` into a contiguous row-major buffer of exactly
/// `width * height` luminance bytes.
///
/// Grayscale sources are borrowed as-is (buffers from the `image` crate are
/// tightly packed, so the contiguity requirement holds by construction);
/// every other layout is converted into a fresh buffer. Alpha and chroma
/// channels are discarded.
///
/// # Errors
///
/// [`ScanError::InvalidInput`] when the image has zero width or height.
pub fn to_luma(img: &DynamicImage) -> ScanResult<Cow<'_, [u8]>> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ScanError::InvalidInput(
            "image has zero width or height".into(),
        ));
    }

    let luma = match img {
        // Already a single 8-bit plane: hand the samples over unchanged.
        DynamicImage::ImageLuma8(gray) => Cow::Borrowed(gray.as_raw().as_slice()),
        // A luma plane with alpha: keep luma, drop alpha.
        DynamicImage::ImageLumaA8(gray) => {
            Cow::Owned(gray.as_raw().iter().step_by(2).copied().collect())
        }
        DynamicImage::ImageRgb8(rgb) => Cow::Owned(
            rgb.as_raw()
                .chunks_exact(3)
                .map(|px| luma8(px[0], px[1], px[2]))
                .collect(),
        ),
        DynamicImage::ImageRgba8(rgba) => Cow::Owned(
            rgba.as_raw()
                .chunks_exact(4)
                .map(|px| luma8(px[0], px[1], px[2]))
                .collect(),
        ),
        // Any other layout: per-pixel access in row-major order.
        other => {
            let mut out = Vec::with_capacity(width as usize * height as usize);
            for y in 0..height {
                for x in 0..width {
                    let [r, g, b, _] = other.get_pixel(x, y).0;
                    out.push(luma8(r, g, b));
                }
            }
            Cow::Owned(out)
        }
    };

    Ok(luma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_grayscale_passthrough_is_lossless_and_borrowed() {
        let pixels: Vec<u8> = (0..64u32).map(|i| (i * 4) as u8).collect();
        let gray = GrayImage::from_raw(8, 8, pixels.clone()).unwrap();
        let img = DynamicImage::ImageLuma8(gray);

        let luma = to_luma(&img).unwrap();
        assert!(matches!(luma, Cow::Borrowed(_)));
        assert_eq!(&*luma, pixels.as_slice());
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let img = DynamicImage::new_luma8(0, 8);
        assert!(matches!(
            to_luma(&img),
            Err(ScanError::InvalidInput(_))
        ));

        let img = DynamicImage::new_rgb8(8, 0);
        assert!(matches!(
            to_luma(&img),
            Err(ScanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rgba_primary_colors() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(4, 1, |x, _| match x {
            0 => Rgba([255, 255, 255, 255]),
            1 => Rgba([255, 0, 0, 255]),
            2 => Rgba([0, 255, 0, 255]),
            _ => Rgba([0, 0, 255, 7]), // alpha must be ignored
        }));

        let luma = to_luma(&img).unwrap();
        assert_eq!(&*luma, &[255, 76, 150, 29]);
    }

    #[test]
    fn test_black_maps_to_zero() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255])));
        let luma = to_luma(&img).unwrap();
        assert!(luma.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, (x + y) as u8, 255])
        }));

        let first = to_luma(&img).unwrap().into_owned();
        let second = to_luma(&img).unwrap().into_owned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rgb_and_rgba_agree() {
        let rgb = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 31) as u8, (y * 29) as u8, 200]));
        let rgba = RgbaImage::from_fn(8, 8, |x, y| {
            Rgba([(x * 31) as u8, (y * 29) as u8, 200, 255])
        });

        let from_rgb = to_luma(&DynamicImage::ImageRgb8(rgb)).unwrap().into_owned();
        let from_rgba = to_luma(&DynamicImage::ImageRgba8(rgba))
            .unwrap()
            .into_owned();
        assert_eq!(from_rgb, from_rgba);
    }

    #[test]
    fn test_luma_alpha_keeps_the_luma_plane() {
        let img = DynamicImage::ImageLumaA8(image::ImageBuffer::from_fn(4, 2, |x, y| {
            LumaA([(x + y * 4) as u8 * 10, 128])
        }));

        let luma = to_luma(&img).unwrap();
        assert_eq!(&*luma, &[0, 10, 20, 30, 40, 50, 60, 70]);
    }

    #[test]
    fn test_generic_path_handles_wide_samples() {
        let img = DynamicImage::ImageLuma16(image::ImageBuffer::from_pixel(
            2,
            2,
            Luma([u16::MAX]),
        ));

        let luma = to_luma(&img).unwrap();
        assert_eq!(&*luma, &[255, 255, 255, 255]);
    }
}
