//! # GRIDLAYER CLI
//!
//! Classifies a GeoJSON file with the power layer and reports what each
//! zoom would render. No merge engine is bundled: output is pre-merge.
//!
//! Usage: gridlayer <input.geojson> [--config <layer.toml>] [--zoom <z>]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use gridlayer::{PipelineResult, TilePipeline, Tiles};
use gridlayer_core::{ShapeKind, Zoom, MAX_ZOOM, MIN_ZOOM};
use gridlayer_geo::{import_geojson, to_geojson};
use gridlayer_power::{LayerConfig, PowerLayer};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    zoom: Option<Zoom>,
}

fn main() -> ExitCode {
    // stdout carries the GeoJSON output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run(args: &Args) -> PipelineResult<()> {
    let config = match &args.config {
        Some(path) => LayerConfig::load(path)?,
        None => LayerConfig::default(),
    };
    let pipeline = TilePipeline::new(PowerLayer::new(Arc::new(config)));
    let records = import_geojson(&args.input)?;
    let tiles = pipeline.classify(records);

    match args.zoom {
        Some(zoom) => {
            let features = tiles.get(&zoom).map_or(&[][..], Vec::as_slice);
            println!("{}", to_geojson(features));
        }
        None => print_summary(pipeline.layer().name(), &tiles),
    }
    Ok(())
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let input = argv
        .get(1)
        .filter(|arg| !arg.starts_with("--"))
        .ok_or("missing input file")?;
    let config = option_value(argv, "--config")?.map(PathBuf::from);
    let zoom = option_value(argv, "--zoom")?
        .map(|value| {
            value
                .parse::<Zoom>()
                .ok()
                .filter(|zoom| *zoom <= MAX_ZOOM)
                .ok_or_else(|| format!("invalid zoom '{value}' (expected {MIN_ZOOM}-{MAX_ZOOM})"))
        })
        .transpose()?;

    Ok(Args {
        input: PathBuf::from(input),
        config,
        zoom,
    })
}

fn option_value<'a>(argv: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    match argv.iter().position(|arg| arg == flag) {
        Some(index) => argv
            .get(index + 1)
            .map(|value| Some(value.as_str()))
            .ok_or_else(|| format!("{flag} needs a value")),
        None => Ok(None),
    }
}

fn print_usage() {
    eprintln!("Usage: gridlayer <input.geojson> [--config <layer.toml>] [--zoom <z>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>  Layer configuration (TOML)");
    eprintln!("  --zoom <z>       Print the features at zoom z as GeoJSON");
}

fn print_summary(layer: &str, tiles: &Tiles) {
    println!("┌─ LAYER '{layer}' ──────────────────────────────────────┐");
    println!("│ zoom  polygons     lines    points     total");
    for zoom in MIN_ZOOM..=MAX_ZOOM {
        let features = tiles.get(&zoom).map_or(&[][..], Vec::as_slice);
        let count = |kind: ShapeKind| {
            features
                .iter()
                .filter(|feature| feature.kind == kind)
                .count()
        };
        println!(
            "│ {:>4}  {:>8}  {:>8}  {:>8}  {:>8}",
            zoom,
            count(ShapeKind::Polygon),
            count(ShapeKind::Line),
            count(ShapeKind::Point),
            features.len()
        );
    }
    println!("└───────────────────────────────────────────────────────┘");
}
