//! Hill exporter: generates every configured hill cluster and writes the
//! geometry to JSON for inspection or offline tooling.
//!
//! Usage: cargo run --release --bin export_hills -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Scene config JSON (default: built-in scene)
//!   --out <DIR>       Output directory (default: "out/hills")
//!   --jobs <N>        Max parallel hill builds (default: all cores)
//!
//! Output structure:
//!   <out>/
//!     manifest.json       # Placements and per-hill counts
//!     hill_<seed>.json    # Full cluster: layers, particles, trees, contours

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use rayon::prelude::*;
use serde_json::json;

use memories::core::{Result, logging};
use memories::generation::TerracedHillGenerator;
use memories::scene::{SceneConfig, generate_hills};

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let output_dir = PathBuf::from(parse_str_arg(&args, "--out").unwrap_or_else(|| "out/hills".to_string()));

    if let Some(jobs) = parse_usize_arg(&args, "--jobs") {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
            log::warn!("Could not size thread pool to {}: {}", jobs, e);
        }
    }

    match run(config_path, output_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<PathBuf>, output_dir: PathBuf) -> Result<()> {
    let config = match config_path {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };
    config.validate()?;

    println!("=== Memories Hill Exporter ===");
    println!("Hills:  {}", config.hills.len());
    println!("Layers: {}, Segments: {}, Density: {}",
        config.hill_generation.layers, config.hill_generation.segments, config.hill_generation.density);
    println!("Output: {}", output_dir.display());
    println!();

    let start = Instant::now();
    let generator = TerracedHillGenerator::new(config.hill_generation.clone());
    let clusters = generate_hills(&generator, &config.hills);
    println!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    std::fs::create_dir_all(&output_dir)?;

    let written: Vec<usize> = clusters
        .par_iter()
        .map(|cluster| -> Result<usize> {
            let path = output_dir.join(format!("hill_{}.json", cluster.params.seed));
            let bytes = serde_json::to_vec(cluster)?;
            std::fs::write(&path, &bytes)?;
            log::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
            Ok(bytes.len())
        })
        .collect::<Result<_>>()?;

    let hills: Vec<_> = clusters
        .iter()
        .zip(&written)
        .map(|(cluster, bytes)| {
            json!({
                "file": format!("hill_{}.json", cluster.params.seed),
                "origin": cluster.origin,
                "scale": cluster.params.scale,
                "height": cluster.params.height,
                "seed": cluster.params.seed,
                "footprint_radius": cluster.layers.first().map_or(0.0, |l| l.max_outer_radius()),
                "layers": cluster.layers.len(),
                "particles": cluster.bushes.len(),
                "trees": cluster.trees.len(),
                "contours": cluster.contours.len(),
                "bytes": bytes,
            })
        })
        .collect();

    let manifest = json!({
        "version": 1,
        "generation": config.hill_generation,
        "hills": hills,
    });
    std::fs::write(output_dir.join("manifest.json"), serde_json::to_string_pretty(&manifest)?)?;

    let total_particles: usize = clusters.iter().map(|c| c.bushes.len()).sum();
    let total_bytes: usize = written.iter().sum();
    println!("Particles: {}", total_particles);
    println!("Written:   {:.1} MB in {:.2}s", total_bytes as f64 / 1_048_576.0, start.elapsed().as_secs_f64());
    Ok(())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
