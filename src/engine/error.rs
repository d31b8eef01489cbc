use std::path::PathBuf;

use crate::experiment::ExperimentError;

/// Errors that can occur while preparing or running an engine script
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error creating or reading an experiment directory
    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    /// Error serializing parameters
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Error reading a tab-separated input
    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The script could not be started
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        /// Program that was executed
        program: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The script exited unsuccessfully
    #[error(
        "An error was encountered while running {package}, (return code {}), please inspect stdout and stderr to learn more.",
        return_code(.code)
    )]
    ScriptFailed {
        /// Package the script drives
        package: String,
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
    },

    /// An action was run without one of its inputs
    #[error("{action} requires the {input} input")]
    MissingInput {
        /// Script name of the action
        action: &'static str,
        /// Name of the missing input
        input: &'static str,
    },

    /// Sample metadata and spectra files name different samples
    #[error("{}", sample_mismatch(.missing_in_metadata, .missing_in_spectra))]
    SampleMetadataMismatch {
        /// Spectra files without a metadata row
        missing_in_metadata: Vec<String>,
        /// Metadata rows without a spectra file
        missing_in_spectra: Vec<String>,
    },
}

fn return_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

fn sample_mismatch(missing_in_metadata: &[String], missing_in_spectra: &[String]) -> String {
    let mut message =
        String::from("There is a mismatch of sample ids in the provided spectra and sample-metadata:");
    if !missing_in_metadata.is_empty() {
        message.push_str(&format!(
            "\nIDs in spectra but missing in sample-metadata: {}",
            missing_in_metadata.join(", ")
        ));
    }
    if !missing_in_spectra.is_empty() {
        message.push_str(&format!(
            "\nIDs in sample-metadata but missing in spectra: {}",
            missing_in_spectra.join(", ")
        ));
    }
    message
}
