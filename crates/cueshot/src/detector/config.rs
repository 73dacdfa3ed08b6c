//! Detection parameters and their validation.

use crate::error::InvalidInput;

/// Tuning for the gradient Hough circle transform.
///
/// Passed by reference to every detection call; nothing is cached between
/// calls. Defaults are tuned for pool balls of 10-40 px radius in a phone
/// photo of the table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Accumulator downscale relative to the image (`1.0` = one cell per
    /// pixel, `2.0` = one cell per 2x2 pixels). Must be positive; values
    /// below `1.0` behave as `1.0`.
    pub resolution_factor: f32,
    /// Minimum distance (pixels) between two reported centers.
    pub min_center_distance: f32,
    /// Sobel gradient magnitude a pixel needs to cast votes.
    pub edge_threshold: f32,
    /// Votes an accumulator peak must exceed to become a candidate.
    pub center_threshold: u32,
    /// Smallest radius searched (pixels, inclusive).
    pub min_radius: u32,
    /// Largest radius searched (pixels, inclusive). The search never goes
    /// past the image diagonal.
    pub max_radius: u32,
    /// Keep only the locally strongest pixel across each edge before voting.
    pub thin_edges: bool,
    /// Optional cap on the number of circles returned (strongest kept).
    pub max_candidates: Option<usize>,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            resolution_factor: 1.2,
            min_center_distance: 30.0,
            edge_threshold: 50.0,
            center_threshold: 30,
            min_radius: 10,
            max_radius: 40,
            thin_edges: false,
            max_candidates: None,
        }
    }
}

impl DetectionParams {
    /// Check the parameter set before any pixel is touched.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !(self.resolution_factor.is_finite() && self.resolution_factor > 0.0) {
            return Err(InvalidInput::ResolutionFactor(self.resolution_factor));
        }
        if !(self.min_center_distance.is_finite() && self.min_center_distance > 0.0) {
            return Err(InvalidInput::MinCenterDistance(self.min_center_distance));
        }
        if !(self.edge_threshold.is_finite() && self.edge_threshold >= 0.0) {
            return Err(InvalidInput::EdgeThreshold(self.edge_threshold));
        }
        if self.min_radius == 0 {
            return Err(InvalidInput::ZeroMinRadius);
        }
        if self.min_radius > self.max_radius {
            return Err(InvalidInput::RadiusRange {
                min_radius: self.min_radius,
                max_radius: self.max_radius,
            });
        }
        Ok(())
    }

    /// Number of radius slices in the accumulator.
    pub fn radius_count(&self) -> usize {
        (self.max_radius.saturating_sub(self.min_radius) + 1) as usize
    }
}
