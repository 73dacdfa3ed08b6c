//! End-to-end shot analysis.
//!
//! Wires the stages together: preprocess -> detect -> pair selection ->
//! angle -> render. Algorithms live in their own modules; this layer owns
//! call order, logging and the insufficient-detections rule.

mod result;
mod run;
mod select;

pub use result::{AnnotatedImage, ShotAnalysis, ShotReport};
pub use run::{analyze, detect_in_image, PipelineConfig};
pub use select::{OrdinalPair, PairSelector, StrongestPair};
