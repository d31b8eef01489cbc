//! # Experiment Directory Schema
//!
//! This module names every file of an XCMS experiment directory and the columns
//! the rest of the crate relies on.
//!
//! ## Directory Layout
//!
//! ```text
//! {experiment}/
//! ├── ms_backend_data.txt                          # One row per spectrum (2-line header)
//! ├── ms_experiment_sample_data.txt                # One row per sample
//! ├── ms_experiment_sample_data_links_spectra.txt  # Headerless (sample, spectrum) pairs
//! ├── ms_experiment_link_mcols.txt                 # Experiment-wide constant
//! ├── spectra_processing_queue.json                # Experiment-wide constant
//! ├── spectra_slots.txt                            # Experiment-wide constant
//! ├── xcms_experiment_process_history.json         # Optional, experiment-wide
//! ├── xcms_experiment_chrom_peaks.txt              # Optional, keyed "CP<n>"
//! ├── xcms_experiment_chrom_peak_data.txt          # Optional, keyed "CP<n>"
//! ├── xcms_experiment_feature_definitions.txt      # Optional
//! └── xcms_experiment_feature_peak_index.txt       # Optional
//! ```
//!
//! ## Row Labels
//!
//! Spectra and samples are labelled with their 1-based position (`"1"`, `"2"`, ...),
//! chromatographic peaks with `"CP1"`, `"CP2"`, .... The labels are positional: the
//! n-th data row of a table always carries label n.

/// Column name constants.
pub mod columns;
mod constants;
mod validation;


pub use columns::*;
pub use constants::*;
pub use validation::{
    validate_columns_exact, validate_columns_superset, SchemaValidationError,
};
