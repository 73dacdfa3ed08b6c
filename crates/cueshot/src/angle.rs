//! Direction of the vector between two image points.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Angle in degrees, normalized into `(-180, 180]`.
///
/// Measured with the `atan2(dy, dx)` convention in image coordinates, so
/// positive angles turn from +x toward +y (downward on screen).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    /// Wrap an arbitrary angle in degrees into `(-180, 180]`.
    pub fn from_degrees(degrees: f64) -> Self {
        let mut d = degrees % 360.0;
        if d <= -180.0 {
            d += 360.0;
        } else if d > 180.0 {
            d -= 360.0;
        }
        // Fold -0.0 so the label never reads "-0.0".
        Self(d + 0.0)
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// The same direction turned by half a revolution.
    pub fn reversed(self) -> Self {
        Self::from_degrees(self.0 + 180.0)
    }

    /// Signed difference `self - other`, normalized.
    pub fn delta(self, other: Angle) -> Angle {
        Self::from_degrees(self.0 - other.0)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Angle of the vector `from -> to` in degrees.
///
/// Coincident points yield 0. The function is total and keeps no state.
pub fn angle_degrees(from: Point, to: Point) -> Angle {
    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    Angle::from_degrees(dy.atan2(dx).to_degrees())
}
