//! Run configuration loaded from TOML.
//!
//! ```toml
//! mesh_in = "skin.msh"
//! mesh_out = "skin_draped.msh"
//! topography_files = ["seabed.xyz", "land.xyz"]
//! topography_format = "scattered"
//! drape_faces = [3, 4]
//! smooth_faces = [1, 2]
//! max_smooth_iterations = 200
//! smooth_tolerance = 0.01
//!
//! [resolution]
//! nx = 400
//! ny = 300
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{DrapeMode, SmoothingParams};
use crate::mesh::MshVersion;
use crate::types::Resolution2D;

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Layout of the topography files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopographyFormat {
    /// Unordered `x y z` records assembled into a grid
    #[default]
    Scattered,
    /// `nx ny` header, axes, row-major elevations
    Grid,
}

/// Target resolution for resampling the assembled grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ResolutionConfig {
    pub nx: usize,
    pub ny: usize,
}

/// Full pipeline configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrapeConfig {
    pub mesh_in: PathBuf,
    pub mesh_out: PathBuf,
    #[serde(default)]
    pub topography_files: Vec<PathBuf>,
    #[serde(default)]
    pub topography_format: TopographyFormat,
    #[serde(default)]
    pub resolution: Option<ResolutionConfig>,
    /// Faces to drape; the i-th face uses the i-th topography file
    #[serde(default)]
    pub drape_faces: Vec<i32>,
    #[serde(default)]
    pub smooth_faces: Vec<i32>,
    #[serde(default = "default_max_smooth_iterations")]
    pub max_smooth_iterations: usize,
    #[serde(default = "default_smooth_tolerance")]
    pub smooth_tolerance: f64,
    #[serde(default)]
    pub drape_mode: DrapeMode,
    #[serde(default = "default_msh_version")]
    pub msh_version: String,
}

fn default_max_smooth_iterations() -> usize {
    200
}

fn default_smooth_tolerance() -> f64 {
    0.01
}

fn default_msh_version() -> String {
    "1".into()
}

impl DrapeConfig {
    /// Load and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&contents)?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration without validating it or resolving paths.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Make every relative path relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.mesh_in);
        resolve(&mut self.mesh_out);
        self.topography_files.iter_mut().for_each(resolve);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.drape_faces.is_empty() && self.topography_files.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{} drape face(s) given but no topography_files",
                self.drape_faces.len()
            )));
        }
        if self.smooth_tolerance.is_nan() || self.smooth_tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "smooth_tolerance must be positive, got {}",
                self.smooth_tolerance
            )));
        }
        if let Some(r) = self.resolution {
            if Resolution2D::checked(r.nx, r.ny).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "resolution must be at least 2×2, got {}×{}",
                    r.nx, r.ny
                )));
            }
        }
        self.version()?;
        Ok(())
    }

    /// Output format version.
    pub fn version(&self) -> Result<MshVersion, ConfigError> {
        MshVersion::from_str(&self.msh_version).map_err(|_| {
            ConfigError::Invalid(format!("Unsupported msh_version '{}'", self.msh_version))
        })
    }

    /// Resampling target, if any.
    pub fn resolution(&self) -> Option<Resolution2D> {
        self.resolution
            .and_then(|r| Resolution2D::checked(r.nx, r.ny))
    }

    pub fn smoothing_params(&self) -> SmoothingParams {
        SmoothingParams {
            max_iterations: self.max_smooth_iterations,
            tolerance: self.smooth_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"
mesh_in = "in.msh"
mesh_out = "out.msh"
"#;

    #[test]
    fn test_defaults() {
        let config = DrapeConfig::from_toml_str(MINIMAL).unwrap();
        assert!(config.topography_files.is_empty());
        assert_eq!(config.topography_format, TopographyFormat::Scattered);
        assert_eq!(config.resolution(), None);
        assert_eq!(config.smoothing_params(), SmoothingParams::default());
        assert_eq!(config.drape_mode, DrapeMode::Add);
        assert_eq!(config.version().unwrap(), MshVersion::V1);
        config.validate().unwrap();
    }

    #[test]
    fn test_full_config() {
        let text = r#"
mesh_in = "in.msh"
mesh_out = "out.msh"
topography_files = ["a.txt", "b.txt"]
topography_format = "grid"
drape_faces = [3, 4, 5]
smooth_faces = [1]
max_smooth_iterations = 50
smooth_tolerance = 0.001
drape_mode = "replace"
msh_version = "1.0"

[resolution]
nx = 10
ny = 20
"#;
        let config = DrapeConfig::from_toml_str(text).unwrap();
        config.validate().unwrap();
        assert_eq!(config.topography_format, TopographyFormat::Grid);
        assert_eq!(config.drape_faces, vec![3, 4, 5]);
        assert_eq!(config.resolution(), Some(Resolution2D::new(10, 20)));
        assert_eq!(config.smoothing_params().max_iterations, 50);
        assert_eq!(config.drape_mode, DrapeMode::Replace);
    }

    #[test]
    fn test_drape_faces_need_topography() {
        let text = format!("{MINIMAL}drape_faces = [1]\n");
        let err = DrapeConfig::from_toml_str(&text).unwrap().validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        for extra in [
            "smooth_tolerance = 0.0\n",
            "smooth_tolerance = -1.0\n",
            "msh_version = \"2.2\"\n",
            "[resolution]\nnx = 1\nny = 5\n",
        ] {
            let text = format!("{MINIMAL}{extra}");
            let config = DrapeConfig::from_toml_str(&text).unwrap();
            assert!(config.validate().is_err(), "accepted: {extra}");
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        let text = format!("{MINIMAL}surface_faces = [1]\n");
        assert!(matches!(
            DrapeConfig::from_toml_str(&text),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drape.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "mesh_in = \"mesh/in.msh\"\nmesh_out = \"/tmp/out.msh\"\ntopography_files = [\"t.xyz\"]"
        )
        .unwrap();

        let config = DrapeConfig::from_file(&path).unwrap();
        assert_eq!(config.mesh_in, dir.path().join("mesh/in.msh"));
        assert_eq!(config.mesh_out, PathBuf::from("/tmp/out.msh"));
        assert_eq!(config.topography_files[0], dir.path().join("t.xyz"));
    }

    #[test]
    fn test_missing_file() {
        let err = DrapeConfig::from_file("/nonexistent/drape.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
