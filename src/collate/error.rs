use std::path::PathBuf;

use crate::experiment::ExperimentError;
use crate::ids::ParseIdError;

/// Errors that can occur while collating experiment directories
#[derive(Debug, thiserror::Error)]
pub enum CollateError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading or writing one of the experiment directories
    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    /// Nothing to collate
    #[error("At least one experiment is required for collation")]
    NoInputs,

    /// An experiment-wide file differs between inputs
    #[error(
        "Mismatching content found in {file}: {}\nOnly artifacts with identical content in {file} can be collated.\n{snippet}",
        .path.display()
    )]
    GlobalFileMismatch {
        /// Name of the differing file
        file: &'static str,
        /// Path of the diverging copy
        path: PathBuf,
        /// First differing line of the reference and the diverging copy
        snippet: String,
    },

    /// An optional experiment-wide file exists in some inputs only
    #[error(
        "{file} is present in {} but missing in {}\nOnly artifacts that all contain {file}, or all lack it, can be collated.",
        .present.display(),
        .missing.display()
    )]
    OptionalFilePresence {
        /// Name of the file
        file: &'static str,
        /// An input that has the file
        present: PathBuf,
        /// An input that lacks the file
        missing: PathBuf,
    },

    /// A JSON file could not be parsed for normalization
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        /// Path of the file
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Two inputs disagree on the columns of a row table
    #[error(
        "There is a column mismatch in one of the files called: {file}\nColumns of experiment at index {reference}:\n{reference_columns}\nColumns of experiment at index {index}:\n{columns}"
    )]
    ColumnMismatch {
        /// Name of the table
        file: &'static str,
        /// Input index of the reference table
        reference: usize,
        /// Column names of the reference table
        reference_columns: String,
        /// Input index of the diverging table
        index: usize,
        /// Column names of the diverging table
        columns: String,
    },

    /// A chromatographic peak refers to a sample with an unparseable index
    #[error("Invalid sample reference in {}: {source}", .path.display())]
    InvalidSample {
        /// Path of the peak table
        path: PathBuf,
        /// Parse error
        #[source]
        source: ParseIdError,
    },
}
