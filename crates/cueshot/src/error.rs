//! Error types returned across the library boundary.

use crate::geometry::Circle;

/// Input rejected before any processing starts.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// The image has no pixels.
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// `min_radius` must be at least one pixel.
    ZeroMinRadius,
    /// `min_radius` exceeds `max_radius`.
    RadiusRange {
        /// Configured lower bound.
        min_radius: u32,
        /// Configured upper bound.
        max_radius: u32,
    },
    /// Accumulator downscale must be finite and positive.
    ResolutionFactor(f32),
    /// Minimum distance between reported centers must be finite and positive.
    MinCenterDistance(f32),
    /// Gradient magnitude threshold must be finite and non-negative.
    EdgeThreshold(f32),
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyImage { width, height } => {
                write!(f, "image has zero area ({}x{})", width, height)
            }
            Self::ZeroMinRadius => write!(f, "min_radius must be at least 1 px"),
            Self::RadiusRange {
                min_radius,
                max_radius,
            } => write!(
                f,
                "min_radius ({}) is greater than max_radius ({})",
                min_radius, max_radius
            ),
            Self::ResolutionFactor(v) => {
                write!(f, "resolution_factor must be positive, got {}", v)
            }
            Self::MinCenterDistance(v) => {
                write!(f, "min_center_distance must be positive, got {}", v)
            }
            Self::EdgeThreshold(v) => {
                write!(f, "edge_threshold must be non-negative, got {}", v)
            }
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Failure of a full analysis run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Image or parameters were rejected up front.
    InvalidInput(InvalidInput),
    /// Fewer than two circles were available for the shot.
    ///
    /// Carries every candidate the detector did report so callers can still
    /// show them.
    InsufficientDetections {
        /// Candidates in detector order (strongest first).
        candidates: Vec<Circle>,
    },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {}", e),
            Self::InsufficientDetections { candidates } => write!(
                f,
                "need at least two balls for an angle, detected {}",
                candidates.len()
            ),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
            Self::InsufficientDetections { .. } => None,
        }
    }
}

impl From<InvalidInput> for PipelineError {
    fn from(e: InvalidInput) -> Self {
        Self::InvalidInput(e)
    }
}
