//! cueshot — billiard ball detection and shot-angle annotation.
//!
//! Finds pool balls in a table photo with a gradient Hough circle transform,
//! measures the direction from a chosen cue ball to a chosen target ball and
//! renders that geometry onto a copy of the photo. The pipeline stages are:
//!
//! 1. **Preprocess** – Rec. 601 intensity, median speckle filter.
//! 2. **Detect** – Sobel edges, (x, y, r) Hough voting, 3-D peak picking,
//!    center-distance suppression.
//! 3. **Select** – caller policy picks cue and target from the ranked
//!    candidates ([`PairSelector`]).
//! 4. **Angle** – `atan2` direction in degrees, normalized to `(-180, 180]`.
//! 5. **Render** – outlines, connecting segment and angle label.
//!
//! # Public API
//! - [`Analyzer`] as the primary entry point
//! - [`PipelineConfig`] and its sections for tuning
//! - free stage functions ([`preprocess()`], [`detect_circles`],
//!   [`angle_degrees`], [`render_annotation`]) for custom pipelines
//!
//! The library never touches the filesystem; decoding and encoding image
//! files is left to the caller.

mod angle;
mod api;
mod detector;
mod error;
mod geometry;
mod pipeline;
mod preprocess;
mod render;

#[cfg(test)]
mod test_utils;

pub use angle::{angle_degrees, Angle};
pub use api::Analyzer;
pub use detector::{detect_circles, DetectionParams};
pub use error::{InvalidInput, PipelineError};
pub use geometry::{Circle, Point};
pub use pipeline::{
    analyze, detect_in_image, AnnotatedImage, OrdinalPair, PairSelector, PipelineConfig,
    ShotAnalysis, ShotReport, StrongestPair,
};
pub use preprocess::{luma601, preprocess, to_intensity, PreprocessConfig};
pub use render::{label_text, render_annotation, AnnotationStyle};
