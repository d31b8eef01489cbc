//! # Collation
//!
//! Merges an ordered list of experiment directories into one. Spectra,
//! samples and chromatographic peaks of the n-th input are renumbered past the
//! rows of the inputs before it, and every cross-reference (the links table and
//! the `sample` column of the peak table) is shifted by the same offsets.
//!
//! Collation is all-or-nothing: the experiment-wide files are compared and the
//! column layouts checked before the output directory is created.
//!
//! ```rust,no_run
//! use xcms_experiment::collate::collate;
//! use xcms_experiment::experiment::ExperimentDir;
//!
//! let inputs = vec![ExperimentDir::open("ko15")?, ExperimentDir::open("ko16")?];
//! let merged = collate(&inputs, "ko15_ko16")?;
//! println!("{}", merged.summary()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod accumulator;
mod error;
mod globals;


pub use accumulator::Offsets;
pub use error::CollateError;
pub use globals::{Normalization, GLOBAL_FILES};

use std::path::Path;

use log::{info, warn};

use crate::experiment::{ExperimentDir, ExperimentFile};

use accumulator::Accumulator;

/// Merge `inputs`, in order, into a new experiment directory at `output`.
///
/// Uses the default [`Normalization`] for the experiment-wide JSON files.
pub fn collate<P: AsRef<Path>>(inputs: &[ExperimentDir], output: P) -> Result<ExperimentDir, CollateError> {
    Collator::default().collate(inputs, output)
}

/// Configurable collation
#[derive(Debug, Clone, Default)]
pub struct Collator {
    normalization: Normalization,
}

impl Collator {
    /// Create a collator with the default normalization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribute keys ignored when comparing JSON files.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Merge `inputs`, in order, into a new experiment directory at `output`.
    pub fn collate<P: AsRef<Path>>(
        &self,
        inputs: &[ExperimentDir],
        output: P,
    ) -> Result<ExperimentDir, CollateError> {
        info!("Collating {} experiments", inputs.len());

        let globals = globals::verify(inputs, &self.normalization)?;

        let merged = inputs
            .iter()
            .enumerate()
            .try_fold(Accumulator::default(), |acc, (index, input)| {
                acc.absorb(index, input)
            })?;
        merged.check_columns()?;

        for file in [
            ExperimentFile::FeatureDefinitions,
            ExperimentFile::FeaturePeakIndex,
        ] {
            if let Some(input) = inputs.iter().find(|input| input.has(file)) {
                warn!(
                    "Dropping {} (found in {}); group peaks again after collation",
                    file, input
                );
            }
        }

        let output = ExperimentDir::create(output)?;
        let reference = &inputs[0];
        for file in globals {
            reference.copy_file_to(file, &output)?;
        }

        output.write_links(&merged.links)?;
        for frames in [merged.backend, merged.samples, merged.chrom_peaks, merged.chrom_peak_data] {
            let file = frames.file();
            if let Some(table) = frames.concat() {
                output.write_table(file, &table)?;
            }
        }

        let offsets = merged.offsets;
        info!(
            "Collated {} spectra, {} samples and {} chromatographic peaks into {}",
            offsets.spectra, offsets.samples, offsets.chrom_peaks, output
        );
        Ok(output)
    }
}
