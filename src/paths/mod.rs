//! # Spectra Path Rewriting
//!
//! The backend and sample-data tables record where the raw spectra of every
//! row live (`dataOrigin`, `dataStorage`, `spectraOrigin`). When an experiment
//! is moved away from its raw files, or rebuilt without them, these helpers
//! keep the recorded paths usable:
//!
//! - [`rewrite_spectra_paths`] points the recorded paths at a new directory,
//!   keeping each file name.
//! - [`create_placeholder_spectra`] creates empty files with the recorded
//!   names so the external engine can load an experiment whose raw spectra
//!   are not available.

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::experiment::{ExperimentDir, ExperimentError, ExperimentFile};
use crate::schema::{BACKEND_PATH_COLUMNS, DATA_ORIGIN, SAMPLE_PATH_COLUMNS};
use crate::table::{requote_like, unquote, RowTable};

/// Missing-value marker written by the backend
const NA: &str = "NA";

/// File name component of a recorded path
pub fn basename(value: &str) -> &str {
    Path::new(value)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(value)
}

/// Sample name of a recorded raw file: its file name without extension
pub fn sample_name(value: &str) -> String {
    Path::new(basename(value))
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| basename(value).to_string())
}

/// Replace the directory part of a raw cell value, keeping its file name and quoting.
///
/// Empty and `NA` cells are returned unchanged.
pub fn relocate(value: &str, new_base: &Path) -> String {
    let bare = unquote(value);
    if bare.is_empty() || bare == NA {
        return value.to_string();
    }
    let relocated = new_base.join(basename(bare));
    requote_like(value, &relocated.to_string_lossy())
}

/// Point the raw-file paths of an experiment at `new_base`.
///
/// Rewrites `dataOrigin`/`dataStorage` in `ms_backend_data.txt` and
/// `spectraOrigin` in `ms_experiment_sample_data.txt` in place. Columns that
/// do not exist are skipped; every other byte of both files is preserved.
/// Returns the number of rewritten cells.
pub fn rewrite_spectra_paths<P: AsRef<Path>>(
    experiment: &ExperimentDir,
    new_base: P,
) -> Result<usize, ExperimentError> {
    let new_base = new_base.as_ref();
    let mut rewritten = 0;

    for (file, columns) in [
        (ExperimentFile::BackendData, &BACKEND_PATH_COLUMNS[..]),
        (ExperimentFile::SampleData, &SAMPLE_PATH_COLUMNS[..]),
    ] {
        let mut table = experiment.read_table(file)?;
        let mut touched = false;
        for column in columns {
            let changed = table.map_column::<ExperimentError, _>(column, |value| {
                Ok(relocate(value, new_base))
            })?;
            if changed {
                debug!("Rewrote column {} of {}", column, file);
                rewritten += table.len();
                touched = true;
            }
        }
        if touched {
            replace_table(experiment, file, &table)?;
        }
    }

    Ok(rewritten)
}

/// Write `table` over `file` through a temporary file in the same directory.
fn replace_table(
    experiment: &ExperimentDir,
    file: ExperimentFile,
    table: &RowTable,
) -> Result<(), ExperimentError> {
    let path = experiment.file(file);
    let codec = file.codec().unwrap_or_default();

    let mut staged = NamedTempFile::new_in(experiment.path())?;
    codec
        .write(table, staged.as_file_mut())
        .map_err(|source| ExperimentError::Table {
            path: path.clone(),
            source,
        })?;
    staged.as_file_mut().flush()?;
    staged.persist(&path).map_err(|e| ExperimentError::IoError(e.error))?;
    Ok(())
}

/// Create empty stand-ins for the raw spectra an experiment refers to.
///
/// Collects the `spectraOrigin` values of the sample data and, when present,
/// the `dataOrigin` values of the backend, then creates one zero-byte file per
/// distinct file name in `target` (created if needed). Returns the created
/// paths in first-seen order.
pub fn create_placeholder_spectra<P: AsRef<Path>>(
    experiment: &ExperimentDir,
    target: P,
) -> Result<Vec<PathBuf>, ExperimentError> {
    let target = target.as_ref();
    fs::create_dir_all(target)?;

    let mut origins = experiment.spectra_origins()?;
    let backend = experiment.backend_data()?;
    if let Some(values) = backend.column_values(DATA_ORIGIN) {
        origins.extend(values.map(|v| unquote(v).to_string()));
    }

    let mut seen = HashSet::new();
    let mut created = Vec::new();
    for origin in &origins {
        if origin.is_empty() || origin == NA {
            continue;
        }
        let name = basename(origin);
        if !seen.insert(name.to_string()) {
            continue;
        }
        let path = target.join(name);
        File::create(&path)?;
        created.push(path);
    }

    debug!(
        "Created {} placeholder spectra files in {}",
        created.len(),
        target.display()
    );
    Ok(created)
}
