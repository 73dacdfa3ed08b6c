//! Orchestrator: preprocess -> detect -> select -> angle -> render.

use image::RgbImage;

use super::result::{AnnotatedImage, ShotAnalysis};
use super::select::PairSelector;
use crate::angle::angle_degrees;
use crate::detector::{detect_circles, DetectionParams};
use crate::error::{InvalidInput, PipelineError};
use crate::geometry::Circle;
use crate::preprocess::{preprocess, PreprocessConfig};
use crate::render::{render_annotation, AnnotationStyle};

/// Every tunable of a full analysis run.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub preprocess: PreprocessConfig,
    pub detection: DetectionParams,
    pub annotation: AnnotationStyle,
}

/// Preprocess `image` and return the detector's ranked candidates.
pub fn detect_in_image(
    image: &RgbImage,
    config: &PipelineConfig,
) -> Result<Vec<Circle>, InvalidInput> {
    config.detection.validate()?;
    let gray = preprocess(image, &config.preprocess)?;
    let circles = detect_circles(&gray, &config.detection)?;
    tracing::info!(
        "detected {} circle(s) in {}x{} image",
        circles.len(),
        image.width(),
        image.height()
    );
    Ok(circles)
}

/// Run the full pipeline with `selector` choosing cue and target.
///
/// Fails with [`PipelineError::InsufficientDetections`] when fewer than two
/// circles were detected or the selector declines every pair; no image is
/// rendered in that case.
pub fn analyze<S>(
    image: &RgbImage,
    config: &PipelineConfig,
    selector: &S,
) -> Result<ShotAnalysis, PipelineError>
where
    S: PairSelector + ?Sized,
{
    let candidates = detect_in_image(image, config)?;
    if candidates.len() < 2 {
        tracing::warn!("need two balls, detected {}", candidates.len());
        return Err(PipelineError::InsufficientDetections { candidates });
    }
    let Some((cue, target)) = selector.select(&candidates) else {
        tracing::warn!("selector found no pair among {} candidates", candidates.len());
        return Err(PipelineError::InsufficientDetections { candidates });
    };

    let angle = angle_degrees(cue.center, target.center);
    tracing::info!(
        "shot angle {:.1} deg from ({:.1}, {:.1}) to ({:.1}, {:.1})",
        angle,
        cue.center.x,
        cue.center.y,
        target.center.x,
        target.center.y
    );
    let image = render_annotation(image, &cue, &target, angle, &config.annotation);

    Ok(ShotAnalysis {
        candidates,
        cue,
        target,
        angle,
        annotated: AnnotatedImage { image, angle },
    })
}
