use cueshot::{Analyzer, PipelineError};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <table.jpg> <annotated.png> [report.json]", args[0]);
        std::process::exit(2);
    }

    let photo = image::open(&args[1])?.to_rgb8();
    let analyzer = Analyzer::new();

    let shot = match analyzer.analyze_strongest(&photo) {
        Ok(shot) => shot,
        Err(PipelineError::InsufficientDetections { candidates }) => {
            println!("Need at least two balls, found {}.", candidates.len());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{} candidates; cue at ({:.1}, {:.1}), target at ({:.1}, {:.1}), angle {:.1} deg",
        shot.candidates.len(),
        shot.cue.center.x,
        shot.cue.center.y,
        shot.target.center.x,
        shot.target.center.y,
        shot.angle
    );
    shot.annotated.image.save(&args[2])?;
    println!("Wrote {}", args[2]);

    if let Some(out_path) = args.get(3) {
        let json = serde_json::to_string_pretty(&shot.report())?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
