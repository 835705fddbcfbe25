//! Command-line entry point.
//!
//! ```text
//! drape --config drape.toml [--output draped.msh] [--verbose]
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use drape_rs::config::DrapeConfig;
use drape_rs::pipeline::{self, DrapeError, PipelineReport};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "drape")]
#[command(about = "Drape topography onto a Gmsh surface mesh and smooth selected faces")]
#[command(version)]
struct Args {
    /// TOML run configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Output mesh, overriding `mesh_out`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(&args) {
        Ok(report) => {
            for r in &report.drape {
                println!(
                    "face {:>4}: draped {} of {} nodes ({} outside grid)",
                    r.face, r.draped, r.marked, r.skipped
                );
            }
            for r in &report.smoothing {
                let status = if r.converged { "converged" } else { "NOT converged" };
                println!(
                    "face {:>4}: smoothing {status} after {} iterations (ratio {:.3e}, {} free nodes)",
                    r.face, r.iterations, r.ratio, r.relaxed_nodes
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<PipelineReport, DrapeError> {
    let mut config = DrapeConfig::from_file(&args.config)?;
    if let Some(output) = &args.output {
        config.mesh_out = output.clone();
    }
    info!(
        config = %args.config.display(),
        mesh_in = %config.mesh_in.display(),
        mesh_out = %config.mesh_out.display(),
        "Starting drape run"
    );
    pipeline::run(&config)
}
