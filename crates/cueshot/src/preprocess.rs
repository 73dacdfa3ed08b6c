//! Color-to-intensity conversion and speckle suppression.
//!
//! The detector only looks at gradients of a single intensity channel. A
//! small median window removes sensor speckle and JPEG ringing, which would
//! otherwise seed spurious circle votes, while leaving ball outlines sharp.

use image::{GrayImage, Luma, RgbImage};

use crate::error::InvalidInput;

/// Preprocessing configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Median window half-size in pixels; the window is `2r + 1` square.
    /// Zero disables smoothing.
    pub median_radius: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { median_radius: 2 }
    }
}

/// Rec. 601 luma of an sRGB pixel, rounded to the nearest level.
#[inline]
pub fn luma601(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGB raster to a single intensity channel.
pub fn to_intensity(image: &RgbImage) -> GrayImage {
    let (w, h) = image.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Luma([luma601(r, g, b)])
    })
}

/// Produce the smoothed intensity image consumed by the circle detector.
///
/// Rejects images with zero area; the input is never modified.
pub fn preprocess(
    image: &RgbImage,
    config: &PreprocessConfig,
) -> Result<GrayImage, InvalidInput> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(InvalidInput::EmptyImage { width, height });
    }

    let gray = to_intensity(image);
    if config.median_radius == 0 {
        return Ok(gray);
    }
    let r = config.median_radius;
    tracing::debug!("median filter {}x{} on {}x{}", 2 * r + 1, 2 * r + 1, width, height);
    Ok(imageproc::filter::median_filter(&gray, r, r))
}

#[cfg(test)]
mod tests {
    use image::Rgb;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn luma_weights_match_rec601() {
        assert_eq!(luma601(0, 0, 0), 0);
        assert_eq!(luma601(255, 255, 255), 255);
        assert_eq!(luma601(255, 0, 0), 76);
        assert_eq!(luma601(0, 255, 0), 150);
        assert_eq!(luma601(0, 0, 255), 29);
    }

    #[test]
    fn zero_area_is_rejected() {
        let img = RgbImage::new(0, 12);
        let err = preprocess(&img, &PreprocessConfig::default()).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::EmptyImage {
                width: 0,
                height: 12
            }
        );
    }

    #[test]
    fn output_is_single_channel_with_same_size() {
        let img = RgbImage::from_pixel(31, 17, Rgb([40, 120, 60]));
        let gray = preprocess(&img, &PreprocessConfig::default()).unwrap();
        assert_eq!(gray.dimensions(), (31, 17));
        let expected = luma601(40, 120, 60);
        assert!(gray.pixels().all(|p| p[0] == expected));
    }

    #[test]
    fn median_removes_isolated_speckle() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut img = RgbImage::from_pixel(64, 64, Rgb([20, 90, 40]));
        for _ in 0..60 {
            let x = rng.gen_range(0..64);
            let y = rng.gen_range(0..64);
            img.put_pixel(x, y, Rgb([255, 255, 255]));
        }

        let raw = preprocess(&img, &PreprocessConfig { median_radius: 0 }).unwrap();
        assert!(raw.pixels().any(|p| p[0] == 255));

        let smoothed = preprocess(&img, &PreprocessConfig::default()).unwrap();
        let cloth = luma601(20, 90, 40);
        assert!(smoothed.pixels().all(|p| p[0] == cloth));
    }

    #[test]
    fn median_keeps_disc_outline() {
        let img = crate::test_utils::draw_table_image(
            80,
            80,
            &[crate::test_utils::Ball::new(40.0, 40.0, 15.0)],
        );
        let gray = preprocess(&img, &PreprocessConfig::default()).unwrap();
        let ball = luma601(240, 240, 230);
        let cloth = luma601(20, 90, 40);
        assert_eq!(gray.get_pixel(40, 40)[0], ball);
        assert_eq!(gray.get_pixel(40, 27)[0], ball);
        assert_eq!(gray.get_pixel(40, 22)[0], cloth);
        assert_eq!(gray.get_pixel(5, 5)[0], cloth);
    }
}
