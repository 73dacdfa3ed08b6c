//! cueshot CLI — detect pool balls and annotate the shot angle.

use clap::{Args, Parser, Subcommand};
use cueshot::{
    Analyzer, Circle, OrdinalPair, PipelineConfig, PipelineError, ShotAnalysis, StrongestPair,
};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cueshot")]
#[command(about = "Detect billiard balls in a table photo and annotate the shot angle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect ball candidates and print them strongest first.
    Detect(CliDetectArgs),

    /// Detect, pick cue and target, and write the annotated image.
    Analyze(CliAnalyzeArgs),

    /// Print the default pipeline configuration as JSON.
    DefaultConfig,
}

/// Config file plus per-flag overrides shared by every pipeline command.
#[derive(Debug, Clone, Default, Args)]
struct CliTuningArgs {
    /// Pipeline configuration JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accumulator cell size relative to image pixels.
    #[arg(long)]
    dp: Option<f32>,

    /// Minimum distance between reported centers (px).
    #[arg(long)]
    min_dist: Option<f32>,

    /// Sobel magnitude an edge pixel needs to vote.
    #[arg(long)]
    edge_threshold: Option<f32>,

    /// Votes an accumulator peak must exceed.
    #[arg(long)]
    center_threshold: Option<u32>,

    /// Smallest ball radius searched (px).
    #[arg(long)]
    min_radius: Option<u32>,

    /// Largest ball radius searched (px).
    #[arg(long)]
    max_radius: Option<u32>,

    /// Thin edges to one pixel before voting.
    #[arg(long)]
    thin_edges: bool,

    /// Median filter half-size (0 disables smoothing).
    #[arg(long)]
    median_radius: Option<u32>,
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the candidate list (JSON). Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    tuning: CliTuningArgs,
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path of the annotated image; format follows the extension.
    #[arg(long)]
    out: PathBuf,

    /// Path to write the shot report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,

    /// Candidate index used as the cue ball (0 = strongest).
    #[arg(long)]
    cue: Option<usize>,

    /// Candidate index used as the target ball.
    #[arg(long)]
    target: Option<usize>,

    #[command(flatten)]
    tuning: CliTuningArgs,
}

/// Candidate list written by `detect`.
#[derive(Debug, serde::Serialize)]
struct DetectOutput {
    image_size: [u32; 2],
    candidates: Vec<Circle>,
}

impl CliTuningArgs {
    fn load_config(&self) -> CliResult<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => PipelineConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.detection.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut PipelineConfig) {
        let det = &mut config.detection;
        if let Some(v) = self.dp {
            det.resolution_factor = v;
        }
        if let Some(v) = self.min_dist {
            det.min_center_distance = v;
        }
        if let Some(v) = self.edge_threshold {
            det.edge_threshold = v;
        }
        if let Some(v) = self.center_threshold {
            det.center_threshold = v;
        }
        if let Some(v) = self.min_radius {
            det.min_radius = v;
        }
        if let Some(v) = self.max_radius {
            det.max_radius = v;
        }
        if self.thin_edges {
            det.thin_edges = true;
        }
        if let Some(v) = self.median_radius {
            config.preprocess.median_radius = v;
        }
    }
}

fn read_config(path: &Path) -> CliResult<PipelineConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| -> CliError {
        format!("Failed to read config {}: {}", path.display(), e).into()
    })?;
    let config = serde_json::from_str(&text).map_err(|e| -> CliError {
        format!("Invalid config {}: {}", path.display(), e).into()
    })?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn load_image(path: &Path) -> CliResult<image::RgbImage> {
    tracing::info!("Loading image: {}", path.display());
    let img = image::open(path).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", path.display(), e).into()
    })?;
    let rgb = img.to_rgb8();
    tracing::info!("Image size: {}x{}", rgb.width(), rgb.height());
    Ok(rgb)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Analyze(args) => run_analyze(&args),
        Commands::DefaultConfig => run_default_config(),
    }
}

// ── default-config ─────────────────────────────────────────────────────

fn run_default_config() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&PipelineConfig::default())?);
    Ok(())
}

// ── detect ─────────────────────────────────────────────────────────────

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    let analyzer = Analyzer::with_config(args.tuning.load_config()?);
    let img = load_image(&args.image)?;

    let candidates = analyzer.detect(&img)?;
    for (i, c) in candidates.iter().enumerate() {
        tracing::info!(
            "#{}: center=({:.1}, {:.1}) r={} score={:.0}",
            i,
            c.center.x,
            c.center.y,
            c.radius,
            c.score
        );
    }

    let output = DetectOutput {
        image_size: [img.width(), img.height()],
        candidates,
    };
    let json = serde_json::to_string_pretty(&output)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Candidates written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// ── analyze ────────────────────────────────────────────────────────────

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    let analyzer = Analyzer::with_config(args.tuning.load_config()?);
    let img = load_image(&args.image)?;

    let result = match (args.cue, args.target) {
        (None, None) => analyzer.analyze(&img, &StrongestPair),
        (cue, target) => {
            let selector = OrdinalPair {
                cue: cue.unwrap_or(0),
                target: target.unwrap_or(1),
            };
            analyzer.analyze(&img, &selector)
        }
    };
    let shot = result.map_err(|e| -> CliError {
        match e {
            PipelineError::InsufficientDetections { candidates } => format!(
                "Need at least two balls detected to compute an angle (found {})",
                candidates.len()
            )
            .into(),
            other => other.into(),
        }
    })?;

    write_outputs(args, &shot)
}

fn write_outputs(args: &CliAnalyzeArgs, shot: &ShotAnalysis) -> CliResult<()> {
    tracing::info!("Shoot angle: {:.1} deg", shot.angle);

    shot.annotated.image.save(&args.out).map_err(|e| -> CliError {
        format!("Failed to write image {}: {}", args.out.display(), e).into()
    })?;
    tracing::info!("Annotated image written to {}", args.out.display());

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&shot.report())?;
        std::fs::write(path, &json)?;
        tracing::info!("Report written to {}", path.display());
    }
    Ok(())
}
