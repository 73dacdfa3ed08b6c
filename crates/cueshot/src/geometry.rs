//! Pixel-space primitives shared by every stage.
//!
//! Coordinates follow the raster convention: origin at the top-left pixel,
//! `x` grows to the right and `y` grows downward.

use serde::{Deserialize, Serialize};

/// A 2-D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    pub fn distance_sq(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Nearest integer pixel, as used by the drawing primitives.
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// A detected circle.
///
/// `center` always lies inside the image the circle was detected in, and
/// `radius` inside the configured `[min_radius, max_radius]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center in image pixel coordinates.
    pub center: Point,
    /// Radius in pixels.
    pub radius: u32,
    /// Accumulator votes around the detected center at this radius.
    /// Higher is stronger.
    pub score: f32,
}

impl Circle {
    pub fn new(center: Point, radius: u32, score: f32) -> Self {
        Self {
            center,
            radius,
            score,
        }
    }
}
