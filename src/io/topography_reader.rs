//! Readers for topography text files.
//!
//! Two whitespace-separated formats are supported. Blank lines and lines
//! starting with `#` are ignored; values may be spread over lines freely.
//!
//! # Rectangular grid
//!
//! ```text
//! # nx ny, then nx x-values, ny y-values, ny*nx elevations (row-major)
//! 3 2
//! 0.0 10.0 20.0
//! 0.0 5.0
//! 1.0 1.5 2.0
//! 1.2 1.7 2.2
//! ```
//!
//! # Scattered points
//!
//! ```text
//! # x y z, one point per record, any order
//! 718600.0 6690000.0 12.5
//! 718753.02 6690000.0 13.1
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::topography::{Sample, TopographyError, TopographyGrid, assemble_grid};

/// Error type for topography file I/O.
#[derive(Debug, Error)]
pub enum TopographyFileError {
    /// File could not be read or written
    #[error("I/O error on topography file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Fewer values than the header announces
    #[error("Expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },

    /// Values do not form a valid grid
    #[error(transparent)]
    Grid(#[from] TopographyError),
}

/// Whitespace-separated fields with their line numbers.
fn fields(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with('#'))
        .flat_map(|(i, line)| line.split_whitespace().map(move |f| (i + 1, f)))
}

fn parse_field<T: std::str::FromStr>(
    (line, field): (usize, &str),
    what: &str,
) -> Result<T, TopographyFileError> {
    field.parse().map_err(|_| TopographyFileError::Parse {
        line,
        message: format!("Invalid {what} '{field}'"),
    })
}

fn header_field(
    field: Option<(usize, &str)>,
    what: &str,
    position: usize,
) -> Result<usize, TopographyFileError> {
    match field {
        Some(field) => parse_field(field, what),
        None => Err(TopographyFileError::Truncated {
            expected: 2,
            found: position,
        }),
    }
}

fn read_text(path: &Path) -> Result<String, TopographyFileError> {
    fs::read_to_string(path).map_err(|source| TopographyFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse rectangular grid text.
pub fn parse_grid(text: &str) -> Result<TopographyGrid, TopographyFileError> {
    let mut fields = fields(text);
    let nx = header_field(fields.next(), "nx", 0)?;
    let ny = header_field(fields.next(), "ny", 1)?;

    let expected = nx
        .checked_mul(ny)
        .and_then(|n| n.checked_add(nx + ny))
        .ok_or_else(|| TopographyFileError::Parse {
            line: 1,
            message: format!("Grid size {nx}×{ny} is too large"),
        })?;

    let mut numbers = Vec::new();
    for field in fields.by_ref().take(expected) {
        numbers.push(parse_field::<f64>(field, "value")?);
    }
    if numbers.len() < expected {
        return Err(TopographyFileError::Truncated {
            expected,
            found: numbers.len(),
        });
    }
    if let Some((line, field)) = fields.next() {
        return Err(TopographyFileError::Parse {
            line,
            message: format!("Unexpected trailing value '{field}'"),
        });
    }

    let values = numbers.split_off(nx + ny);
    let y = numbers.split_off(nx);
    let grid = TopographyGrid::new(numbers, y, values)?;
    Ok(grid)
}

/// Parse scattered `x y z` text.
pub fn parse_scattered(text: &str) -> Result<Vec<Sample>, TopographyFileError> {
    let mut samples = Vec::new();
    let mut fields = fields(text);
    while let Some(first) = fields.next() {
        let x = parse_field(first, "x")?;
        let (Some(second), Some(third)) = (fields.next(), fields.next()) else {
            return Err(TopographyFileError::Parse {
                line: first.0,
                message: "Incomplete point, expected: x y z".into(),
            });
        };
        let y = parse_field(second, "y")?;
        let z = parse_field(third, "z")?;
        samples.push(Sample::new(x, y, z));
    }
    Ok(samples)
}

/// Read a rectangular topography grid file.
pub fn read_grid_file(path: &Path) -> Result<TopographyGrid, TopographyFileError> {
    let grid = parse_grid(&read_text(path)?)?;
    debug!(path = %path.display(), resolution = %grid.resolution(), "Read topography grid");
    Ok(grid)
}

/// Read a scattered-point topography file.
pub fn read_scattered_file(path: &Path) -> Result<Vec<Sample>, TopographyFileError> {
    let samples = parse_scattered(&read_text(path)?)?;
    debug!(path = %path.display(), samples = samples.len(), "Read scattered topography");
    Ok(samples)
}

/// Read a scattered-point file and assemble it into a grid.
pub fn read_scattered_grid(path: &Path) -> Result<TopographyGrid, TopographyFileError> {
    let grid = assemble_grid(read_scattered_file(path)?)?;
    Ok(grid)
}

/// Write a grid in the rectangular grid format.
pub fn write_grid(grid: &TopographyGrid, path: &Path) -> Result<(), TopographyFileError> {
    let io_error = |source| TopographyFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_grid_to(&mut writer, grid).map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}

fn write_line<W: Write>(writer: &mut W, values: &[f64]) -> std::io::Result<()> {
    let mut sep = "";
    for v in values {
        write!(writer, "{sep}{v}")?;
        sep = " ";
    }
    writeln!(writer)
}

fn write_grid_to<W: Write>(writer: &mut W, grid: &TopographyGrid) -> std::io::Result<()> {
    writeln!(writer, "{} {}", grid.nx(), grid.ny())?;
    write_line(writer, grid.x_axis())?;
    write_line(writer, grid.y_axis())?;
    for iy in 0..grid.ny() {
        write_line(writer, grid.row(iy))?;
    }
    Ok(())
}
