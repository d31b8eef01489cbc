use std::path::PathBuf;

use crate::table::TableError;

/// Errors that can occur when accessing an experiment directory
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The experiment directory does not exist
    #[error("Experiment directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The path exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A non-empty directory already exists at the output location
    #[error("Experiment directory already exists and is not empty: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A required file is missing
    #[error("Missing {file} in {}", .dir.display())]
    MissingFile {
        /// Name of the missing file
        file: &'static str,
        /// Experiment directory
        dir: PathBuf,
    },

    /// A table could not be parsed
    #[error("Failed to parse {}: {source}", .path.display())]
    Table {
        /// Path of the table
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: TableError,
    },

    /// A table lacks a column the operation needs
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn {
        /// Name of the table
        file: &'static str,
        /// Name of the missing column
        column: &'static str,
    },
}
