//! Writers for the estimation and simulation output files.
//!
//! All numeric outputs are whitespace-delimited text with a header row,
//! one row per outer iteration (trajectories) or a single row (observed
//! statistics).

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::graph::Graph;

use super::{error::OutputError, pajek};

/// Appends whitespace-delimited rows to a trajectory file (coefficients
/// or statistic drifts), one per outer iteration.
#[derive(Debug)]
pub struct TrajectoryWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl TrajectoryWriter {
    /// Creates the file and writes the header row: `t` followed by the
    /// effect names.
    ///
    /// # Errors
    /// Returns [`OutputError`] when the file cannot be created.
    pub fn create(path: &Path, names: &[&str]) -> Result<Self, OutputError> {
        let file = File::create(path).map_err(|source| OutputError::io(path, source))?;
        let mut writer = BufWriter::new(file);
        let mut header = String::from("t");
        for name in names {
            header.push(' ');
            header.push_str(name);
        }
        writeln!(writer, "{header}").map_err(|source| OutputError::io(path, source))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    /// Appends one row.
    ///
    /// # Errors
    /// Returns [`OutputError`] on a write failure.
    pub fn append(&mut self, iteration: u64, values: &[f64]) -> Result<(), OutputError> {
        let mut row = iteration.to_string();
        for value in values {
            row.push(' ');
            row.push_str(&format!("{value}"));
        }
        writeln!(self.writer, "{row}").map_err(|source| OutputError::io(&self.path, source))
    }

    /// Flushes buffered rows to disk.
    ///
    /// # Errors
    /// Returns [`OutputError`] on a flush failure.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer
            .flush()
            .map_err(|source| OutputError::io(&self.path, source))
    }
}

/// Writes the observed sufficient statistics: a name header and a single
/// value row.
///
/// # Errors
/// Returns [`OutputError`] when the file cannot be written.
pub fn write_observed_stats(
    path: &Path,
    names: &[&str],
    values: &[f64],
) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    let mut render = || -> std::io::Result<()> {
        writeln!(writer, "{}", names.join(" "))?;
        let row: Vec<String> = values.iter().map(|value| format!("{value}")).collect();
        writeln!(writer, "{}", row.join(" "))?;
        writer.flush()
    };
    render().map_err(|source| OutputError::io(path, source))
}

/// Writes one simulated-network snapshot as `<prefix>_<index>.net`.
///
/// # Errors
/// Returns [`OutputError`] when the file cannot be written.
pub fn write_snapshot(prefix: &str, index: u64, graph: &Graph) -> Result<PathBuf, OutputError> {
    let path = PathBuf::from(format!("{prefix}_{index}.net"));
    pajek::write_network(graph, &path)?;
    Ok(path)
}
