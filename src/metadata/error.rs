use crate::experiment::ExperimentError;

/// Errors that can occur while exporting spectral metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error writing the export
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    /// TSV writing error
    #[error("TSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error reading the experiment
    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    /// A required column is missing from the backend table
    #[error("Missing required column in ms_backend_data.txt: {0}")]
    MissingColumn(&'static str),

    /// A cell that must be numeric is not
    #[error("Spectrum {spectrum}: invalid {column} value '{value}'")]
    InvalidNumber {
        /// Label of the spectrum
        spectrum: String,
        /// Column name
        column: &'static str,
        /// Offending value
        value: String,
    },
}
