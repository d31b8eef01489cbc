//! # Experiment Directories
//!
//! [`ExperimentDir`] is a handle to one XCMS experiment on disk. It knows the
//! file layout described in [`crate::schema`] and reads the tables through the
//! [`crate::table`] codec, attaching the file path to every parse error.
//!
//! Directories are treated as immutable once written: every operation in this
//! crate that produces an experiment writes a new directory.
//!
//! ```rust,no_run
//! use xcms_experiment::experiment::ExperimentDir;
//!
//! let experiment = ExperimentDir::open("ko15")?;
//! let summary = experiment.summary()?;
//! println!("{} spectra in {} samples", summary.spectra, summary.samples);
//! # Ok::<(), xcms_experiment::experiment::ExperimentError>(())
//! ```

mod error;
mod files;
mod summary;


pub use error::ExperimentError;
pub use files::ExperimentFile;
pub use summary::ExperimentSummary;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::paths::sample_name;
use crate::schema::SPECTRA_ORIGIN;
use crate::table::{unquote, LinksTable, RowTable};

/// Handle to an experiment directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExperimentDir {
    path: PathBuf,
}

impl ExperimentDir {
    /// Open an existing experiment directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExperimentError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExperimentError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(ExperimentError::NotADirectory(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Create a new, empty experiment directory.
    ///
    /// An existing empty directory is reused; a non-empty one is an error.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ExperimentError> {
        let path = path.as_ref();
        if path.exists() {
            if !path.is_dir() {
                return Err(ExperimentError::NotADirectory(path.to_path_buf()));
            }
            if fs::read_dir(path)?.next().is_some() {
                return Err(ExperimentError::AlreadyExists(path.to_path_buf()));
            }
        } else {
            fs::create_dir_all(path)?;
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Create a new experiment directory with a unique name inside `parent`.
    pub fn create_in<P: AsRef<Path>>(parent: P) -> Result<Self, ExperimentError> {
        Self::create(parent.as_ref().join(Uuid::new_v4().to_string()))
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of one of the experiment's files
    pub fn file(&self, file: ExperimentFile) -> PathBuf {
        self.path.join(file.file_name())
    }

    /// Whether the file exists in this directory
    pub fn has(&self, file: ExperimentFile) -> bool {
        self.file(file).is_file()
    }

    /// Read a labelled row table; missing files are an error.
    pub fn read_table(&self, file: ExperimentFile) -> Result<RowTable, ExperimentError> {
        let path = self.file(file);
        if !path.is_file() {
            return Err(ExperimentError::MissingFile {
                file: file.file_name(),
                dir: self.path.clone(),
            });
        }
        let codec = file.codec().unwrap_or_default();
        codec
            .read_path(&path)
            .map_err(|source| ExperimentError::Table { path, source })
    }

    /// Read a labelled row table, returning `None` if the file does not exist.
    pub fn read_optional_table(
        &self,
        file: ExperimentFile,
    ) -> Result<Option<RowTable>, ExperimentError> {
        if self.has(file) {
            self.read_table(file).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Write a labelled row table into this directory.
    pub fn write_table(&self, file: ExperimentFile, table: &RowTable) -> Result<(), ExperimentError> {
        let path = self.file(file);
        file.codec()
            .unwrap_or_default()
            .write_path(table, &path)
            .map_err(|source| ExperimentError::Table { path, source })
    }

    /// `ms_backend_data.txt`
    pub fn backend_data(&self) -> Result<RowTable, ExperimentError> {
        self.read_table(ExperimentFile::BackendData)
    }

    /// `ms_experiment_sample_data.txt`
    pub fn sample_data(&self) -> Result<RowTable, ExperimentError> {
        self.read_table(ExperimentFile::SampleData)
    }

    /// `xcms_experiment_chrom_peaks.txt`, if present
    pub fn chrom_peaks(&self) -> Result<Option<RowTable>, ExperimentError> {
        self.read_optional_table(ExperimentFile::ChromPeaks)
    }

    /// `xcms_experiment_chrom_peak_data.txt`, if present
    pub fn chrom_peak_data(&self) -> Result<Option<RowTable>, ExperimentError> {
        self.read_optional_table(ExperimentFile::ChromPeakData)
    }

    /// The sample-to-spectrum links
    pub fn links(&self) -> Result<LinksTable, ExperimentError> {
        let path = self.file(ExperimentFile::SampleLinks);
        if !path.is_file() {
            return Err(ExperimentError::MissingFile {
                file: ExperimentFile::SampleLinks.file_name(),
                dir: self.path.clone(),
            });
        }
        LinksTable::read_path(&path).map_err(|source| ExperimentError::Table { path, source })
    }

    /// Write the sample-to-spectrum links into this directory.
    pub fn write_links(&self, links: &LinksTable) -> Result<(), ExperimentError> {
        let path = self.file(ExperimentFile::SampleLinks);
        links
            .write_path(&path)
            .map_err(|source| ExperimentError::Table { path, source })
    }

    /// Unquoted `spectraOrigin` values, one per sample, in sample order
    pub fn spectra_origins(&self) -> Result<Vec<String>, ExperimentError> {
        let samples = self.sample_data()?;
        let values = samples
            .column_values(SPECTRA_ORIGIN)
            .ok_or(ExperimentError::MissingColumn {
                file: ExperimentFile::SampleData.file_name(),
                column: SPECTRA_ORIGIN,
            })?;
        Ok(values.map(|v| unquote(v).to_string()).collect())
    }

    /// Sample names (raw file base name without extension), in sample order
    pub fn sample_names(&self) -> Result<Vec<String>, ExperimentError> {
        Ok(self
            .spectra_origins()?
            .iter()
            .map(|origin| sample_name(origin))
            .collect())
    }

    /// Row counts and optional-file presence
    pub fn summary(&self) -> Result<ExperimentSummary, ExperimentError> {
        ExperimentSummary::collect(self)
    }

    /// Copy a file of this experiment verbatim into `target`.
    pub fn copy_file_to(&self, file: ExperimentFile, target: &ExperimentDir) -> Result<(), ExperimentError> {
        fs::copy(self.file(file), target.file(file))?;
        Ok(())
    }

    /// Delete the directory and everything in it.
    pub fn remove(self) -> Result<(), ExperimentError> {
        fs::remove_dir_all(&self.path)?;
        Ok(())
    }
}

impl AsRef<Path> for ExperimentDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ExperimentDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
