//! # xcms-experiment - XCMS Experiment Directories
//!
//! `xcms_experiment` manipulates serialized XCMS experiments: directories of
//! tab-separated tables and JSON files written by the R `XcmsExperiment`
//! serializer. The heavy lifting (peak picking, alignment, grouping) stays in
//! R; this crate moves experiments around, splits and merges them, and drives
//! the R scripts.
//!
//! ## Key Features
//!
//! - **Collation**: Merge experiments that were processed separately into
//!   one, renumbering spectra, samples and chromatographic peaks so all
//!   cross-table references stay valid.
//!
//! - **Partitioning**: Split an experiment along its samples so each part can
//!   be processed on its own.
//!
//! - **Path Rewriting**: Point an experiment at the location its raw spectra
//!   files live in now.
//!
//! - **Engine Actions**: Build and run the R script invocations for reading
//!   spectra, peak detection, alignment, grouping, gap filling and spectral
//!   matching.
//!
//! - **Validation**: Structural checks of every file of a directory.
//!
//! - **Reference Spectra**: Download the MassBank library for spectral
//!   matching.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xcms_experiment::collate::collate;
//! use xcms_experiment::experiment::ExperimentDir;
//!
//! let inputs = vec![
//!     ExperimentDir::open("ko15_peaks")?,
//!     ExperimentDir::open("ko16_peaks")?,
//! ];
//! let collated = collate(&inputs, "collated")?;
//! println!("{}", collated.summary()?);
//! # Ok::<(), xcms_experiment::collate::CollateError>(())
//! ```
//!
//! ## Directory Layout
//!
//! ```text
//! experiment/
//! ├── ms_backend_data.txt                          # one row per spectrum
//! ├── ms_experiment_sample_data.txt                # one row per sample
//! ├── ms_experiment_sample_data_links_spectra.txt  # sample -> spectrum
//! ├── ms_experiment_link_mcols.txt
//! ├── spectra_processing_queue.json
//! ├── spectra_slots.txt
//! ├── xcms_experiment_process_history.json         # optional
//! ├── xcms_experiment_chrom_peaks.txt              # optional
//! ├── xcms_experiment_chrom_peak_data.txt          # optional
//! ├── xcms_experiment_feature_definitions.txt      # optional
//! └── xcms_experiment_feature_peak_index.txt       # optional
//! ```
//!
//! ## Architecture
//!
//! - [`table`]: byte-preserving codec for the labelled row tables
//! - [`ids`]: typed 1-based row identifiers
//! - [`schema`]: file names, column lists and header validation
//! - [`experiment`]: handle on one experiment directory
//! - [`paths`]: raw file path rewriting and placeholder spectra
//! - [`collate`]: merging experiments
//! - [`partition`]: splitting experiments
//! - [`engine`]: R script invocations
//! - [`metadata`]: per-spectrum metadata export
//! - [`validator`]: structural validation reports
//! - [`database`]: reference spectra download

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod collate;
pub mod database;
pub mod engine;
pub mod experiment;
pub mod ids;
pub mod metadata;
pub mod partition;
pub mod paths;
pub mod schema;
pub mod table;
pub mod validator;

#[cfg(test)]
mod fixtures;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::collate::{collate, CollateError, Collator, Normalization};
    pub use crate::database::{fetch_massbank, DatabaseError, MassBankFetcher};
    pub use crate::engine::actions::{
        run_action, Action, ActionInputs, AdjustRetentionTimeObiwarp, FillPeaksArea,
        FindPeaksCentWave, GroupPeaksDensity, MatchSpectra, ReadMsExperiment,
    };
    pub use crate::engine::{Engine, EngineConfig, EngineError, Invocation, RScriptEngine};
    pub use crate::experiment::{ExperimentDir, ExperimentError, ExperimentFile, ExperimentSummary};
    pub use crate::ids::{PeakIndex, RowId, SampleIndex, SpectrumIndex};
    pub use crate::metadata::{spectral_metadata, MetadataError, SpectralMetadata};
    pub use crate::partition::{partition, PartitionError, PartitionKey, PartitionPlan};
    pub use crate::paths::{create_placeholder_spectra, rewrite_spectra_paths};
    pub use crate::table::{LinksTable, RowTable, RowTableCodec, TableError};
    pub use crate::validator::{validate_experiment, ValidationReport};
}
