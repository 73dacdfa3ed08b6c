//! High-level analysis API.
//!
//! [`Analyzer`] is the primary entry point. It owns a [`PipelineConfig`]
//! and runs detection or the full shot analysis on any number of images.

use image::RgbImage;

use crate::error::{InvalidInput, PipelineError};
use crate::geometry::Circle;
use crate::pipeline::{self, PairSelector, PipelineConfig, ShotAnalysis, StrongestPair};

/// Primary analysis interface.
///
/// Create once, analyze many images. Holds no per-image state, so a shared
/// reference can be used from several threads.
///
/// # Examples
///
/// ```no_run
/// use cueshot::Analyzer;
///
/// let photo = image::open("table.jpg").unwrap().to_rgb8();
/// let analyzer = Analyzer::new();
/// match analyzer.analyze_strongest(&photo) {
///     Ok(shot) => println!("angle {:.1} deg", shot.angle),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: PipelineConfig,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut PipelineConfig {
        &mut self.config
    }

    /// Ranked circle candidates in `image`, strongest first.
    pub fn detect(&self, image: &RgbImage) -> Result<Vec<Circle>, InvalidInput> {
        pipeline::detect_in_image(image, &self.config)
    }

    /// Full analysis with a caller-supplied cue/target selection policy.
    pub fn analyze<S>(&self, image: &RgbImage, selector: &S) -> Result<ShotAnalysis, PipelineError>
    where
        S: PairSelector + ?Sized,
    {
        pipeline::analyze(image, &self.config, selector)
    }

    /// Full analysis taking the two strongest candidates as cue and target.
    pub fn analyze_strongest(&self, image: &RgbImage) -> Result<ShotAnalysis, PipelineError> {
        self.analyze(image, &StrongestPair)
    }
}
