//! Circle detection on a preprocessed intensity image.
//!
//! Stages: Sobel edges -> (x, y, r) Hough vote -> 3-D local maxima above
//! `center_threshold` -> greedy center-distance suppression. Output is sorted
//! strongest first and is fully deterministic for a given image and
//! parameter set.

pub(crate) mod accumulator;
pub(crate) mod config;
pub(crate) mod dedup;
pub(crate) mod edges;

use image::GrayImage;

pub use config::DetectionParams;

use crate::error::InvalidInput;
use crate::geometry::{Circle, Point};
use accumulator::HoughAccumulator;
use dedup::suppress_close_peaks;
use edges::extract_edges;

/// Detect circles in a single-channel image.
///
/// Returns candidates ordered by descending accumulator score. No detections is an
/// empty vector, never an error; only invalid parameters or a zero-area image
/// are rejected, before any scanning.
pub fn detect_circles(
    gray: &GrayImage,
    params: &DetectionParams,
) -> Result<Vec<Circle>, InvalidInput> {
    params.validate()?;
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(InvalidInput::EmptyImage { width, height });
    }

    let edges = extract_edges(gray, params.edge_threshold, params.thin_edges);
    tracing::debug!(
        "{} edge pixels above {} (peak magnitude {:.0})",
        edges.len(),
        params.edge_threshold,
        edges.iter().map(|e| e.magnitude).fold(0.0f32, f32::max)
    );
    if edges.is_empty() {
        return Ok(Vec::new());
    }

    let acc = HoughAccumulator::new(width, height, params);
    let (cols, rows, n_radii) = acc.dims();
    if n_radii == 0 {
        tracing::debug!("radius range starts beyond the {}x{} image", width, height);
        return Ok(Vec::new());
    }
    tracing::debug!("scanning {}x{}x{} accumulator", cols, rows, n_radii);

    let peaks = acc.local_maxima(&edges, params.center_threshold);
    tracing::debug!("{} accumulator peaks above {}", peaks.len(), params.center_threshold);

    let mut kept = suppress_close_peaks(peaks, params.min_center_distance);
    if let Some(max) = params.max_candidates {
        kept.truncate(max);
    }

    Ok(kept
        .into_iter()
        .map(|p| Circle::new(Point::new(p.x, p.y), p.radius, p.score as f32))
        .collect())
}
