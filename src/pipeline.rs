//! End-to-end drape run: read mesh, drape faces, smooth faces, write mesh.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DrapeConfig, TopographyFormat};
use crate::geometry::{DrapeReport, SmoothingReport, drape_face, smooth_faces};
use crate::io::{TopographyFileError, read_grid_file, read_scattered_grid};
use crate::mesh::{GmshError, SurfaceMesh, read_msh, write_msh};
use crate::topography::{TopographyError, TopographyGrid, resample};

// =============================================================================
// Errors
// =============================================================================

/// Any failure of a pipeline run.
#[derive(Debug, Error)]
pub enum DrapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mesh(#[from] GmshError),

    #[error(transparent)]
    TopographyFile(#[from] TopographyFileError),

    #[error(transparent)]
    Topography(#[from] TopographyError),
}

// =============================================================================
// Report
// =============================================================================

/// Per-face outcomes of a run, in configuration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineReport {
    pub drape: Vec<DrapeReport>,
    pub smoothing: Vec<SmoothingReport>,
}

impl PipelineReport {
    /// True if every smoothed face met its tolerance.
    pub fn all_converged(&self) -> bool {
        self.smoothing.iter().all(|r| r.converged)
    }

    /// Nodes left untouched because they fell outside their grid.
    pub fn skipped_nodes(&self) -> usize {
        self.drape.iter().map(|r| r.skipped).sum()
    }
}

// =============================================================================
// Run
// =============================================================================

/// Load one topography file as a grid, resampling it if requested.
pub fn load_topography(path: &Path, config: &DrapeConfig) -> Result<TopographyGrid, DrapeError> {
    let grid = match config.topography_format {
        TopographyFormat::Scattered => read_scattered_grid(path)?,
        TopographyFormat::Grid => read_grid_file(path)?,
    };
    info!(
        path = %path.display(),
        resolution = %grid.resolution(),
        bounds = %grid.bounds(),
        "Loaded topography"
    );

    match config.resolution() {
        Some(target) => Ok(resample(&grid, target)?),
        None => Ok(grid),
    }
}

/// Drape and smooth `mesh` in memory.
///
/// The i-th drape face uses the i-th topography file. Faces beyond the
/// number of files reuse the last grid loaded. A grid is loaded when first
/// needed and dropped before the next one is read.
pub fn process(mesh: &mut SurfaceMesh, config: &DrapeConfig) -> Result<PipelineReport, DrapeError> {
    let mut report = PipelineReport::default();

    let mut current: Option<TopographyGrid> = None;
    for (i, &face) in config.drape_faces.iter().enumerate() {
        if let Some(path) = config.topography_files.get(i) {
            drop(current.take());
            current = Some(load_topography(path, config)?);
        } else {
            debug!(face, "Reusing previous topography grid");
        }
        let Some(grid) = current.as_ref() else {
            return Err(ConfigError::Invalid(format!(
                "no topography file available for drape face {face}"
            ))
            .into());
        };
        report.drape.push(drape_face(mesh, face, grid, config.drape_mode));
    }
    drop(current);

    if !config.smooth_faces.is_empty() {
        report.smoothing = smooth_faces(mesh, &config.smooth_faces, &config.smoothing_params());
    }
    Ok(report)
}

/// Run the full pipeline described by `config`.
pub fn run(config: &DrapeConfig) -> Result<PipelineReport, DrapeError> {
    config.validate()?;
    let version = config.version()?;
    let start = Instant::now();

    let mut mesh = read_msh(&config.mesh_in)?;
    let report = process(&mut mesh, config)?;
    write_msh(&mesh, &config.mesh_out, version)?;

    if !report.all_converged() {
        warn!("Smoothing did not converge on every face");
    }
    info!(
        faces_draped = report.drape.len(),
        faces_smoothed = report.smoothing.len(),
        skipped_nodes = report.skipped_nodes(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Pipeline finished"
    );
    Ok(report)
}
