use image::RgbImage;

use crate::angle::Angle;
use crate::geometry::Circle;

/// Annotated copy of the input together with the angle shown in its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedImage {
    pub image: RgbImage,
    pub angle: Angle,
}

/// Everything produced by one successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotAnalysis {
    /// Every circle the detector reported, strongest first.
    pub candidates: Vec<Circle>,
    /// Circle chosen as the cue ball.
    pub cue: Circle,
    /// Circle chosen as the target ball.
    pub target: Circle,
    /// Direction from cue center to target center.
    pub angle: Angle,
    pub annotated: AnnotatedImage,
}

impl ShotAnalysis {
    /// Serializable summary without the pixel buffer.
    pub fn report(&self) -> ShotReport {
        ShotReport {
            image_size: [
                self.annotated.image.width(),
                self.annotated.image.height(),
            ],
            candidates: self.candidates.clone(),
            cue: self.cue,
            target: self.target,
            angle_deg: self.angle.degrees(),
        }
    }
}

/// JSON summary of a shot analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShotReport {
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Detector candidates, strongest first.
    pub candidates: Vec<Circle>,
    pub cue: Circle,
    pub target: Circle,
    /// Shot angle in degrees, in `(-180, 180]`.
    pub angle_deg: f64,
}
