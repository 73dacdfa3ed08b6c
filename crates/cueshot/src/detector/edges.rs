//! Sobel edge extraction feeding the Hough vote.
//!
//! Every pixel whose gradient magnitude reaches the threshold becomes an
//! [`EdgePoint`] carrying the unit gradient direction. With thinning enabled,
//! only the pixel that dominates its two neighbours along the quantized
//! gradient direction survives, leaving one-pixel-wide outlines.

use image::GrayImage;

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// An edge pixel with its normalized gradient direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgePoint {
    pub x: u32,
    pub y: u32,
    /// Unit gradient x component (toward brighter pixels).
    pub dx: f32,
    /// Unit gradient y component (toward brighter pixels).
    pub dy: f32,
    pub magnitude: f32,
}

struct Gradients {
    w: usize,
    h: usize,
    gx: Vec<f32>,
    gy: Vec<f32>,
    mag: Vec<f32>,
}

impl Gradients {
    fn sobel(gray: &GrayImage) -> Self {
        let (w, h) = gray.dimensions();
        let gx: Vec<f32> = imageproc::gradients::horizontal_sobel(gray)
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect();
        let gy: Vec<f32> = imageproc::gradients::vertical_sobel(gray)
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect();
        let mag = gx
            .iter()
            .zip(gy.iter())
            .map(|(&a, &b)| (a * a + b * b).sqrt())
            .collect();
        Self {
            w: w as usize,
            h: h as usize,
            gx,
            gy,
            mag,
        }
    }

    /// Magnitude at a signed offset, zero outside the image.
    #[inline]
    fn mag_at(&self, x: usize, y: usize, ox: i32, oy: i32) -> f32 {
        let nx = x as i64 + ox as i64;
        let ny = y as i64 + oy as i64;
        if nx < 0 || ny < 0 || nx >= self.w as i64 || ny >= self.h as i64 {
            return 0.0;
        }
        self.mag[ny as usize * self.w + nx as usize]
    }

    /// Whether the pixel is the ridge of its edge along the gradient.
    ///
    /// Ties keep the pixel on the darker side so a symmetric two-pixel step
    /// yields exactly one survivor.
    fn is_ridge(&self, x: usize, y: usize) -> bool {
        let idx = y * self.w + x;
        let (gx, gy, mag) = (self.gx[idx], self.gy[idx], self.mag[idx]);
        let (ax, ay) = (gx.abs(), gy.abs());

        let (sx, sy) = if ay <= ax * TAN_22_5_DEG {
            (gx.signum() as i32, 0)
        } else if ax <= ay * TAN_22_5_DEG {
            (0, gy.signum() as i32)
        } else {
            (gx.signum() as i32, gy.signum() as i32)
        };

        let behind = self.mag_at(x, y, -sx, -sy);
        let ahead = self.mag_at(x, y, sx, sy);
        mag > behind && mag >= ahead
    }
}

/// Extract edge pixels from a preprocessed intensity image.
pub(crate) fn extract_edges(gray: &GrayImage, threshold: f32, thin: bool) -> Vec<EdgePoint> {
    let grads = Gradients::sobel(gray);
    // A zero threshold must still skip flat pixels: they carry no direction.
    let min_mag = threshold.max(f32::MIN_POSITIVE);

    let mut edges = Vec::new();
    for y in 0..grads.h {
        for x in 0..grads.w {
            let idx = y * grads.w + x;
            let mag = grads.mag[idx];
            if mag < min_mag {
                continue;
            }
            if thin && !grads.is_ridge(x, y) {
                continue;
            }
            edges.push(EdgePoint {
                x: x as u32,
                y: y as u32,
                dx: grads.gx[idx] / mag,
                dy: grads.gy[idx] / mag,
                magnitude: mag,
            });
        }
    }
    edges
}
