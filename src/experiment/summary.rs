use std::fmt;

use serde::Serialize;

use super::{ExperimentDir, ExperimentError, ExperimentFile};

/// Row counts and file inventory of one experiment directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentSummary {
    /// Number of spectra in `ms_backend_data.txt`
    pub spectra: usize,
    /// Number of samples in `ms_experiment_sample_data.txt`
    pub samples: usize,
    /// Number of sample-to-spectrum links
    pub links: usize,
    /// Number of chromatographic peaks, if peaks were detected
    pub chrom_peaks: Option<usize>,
    /// Sample names in sample order
    pub sample_names: Vec<String>,
    /// Optional files present in the directory
    pub optional_files: Vec<&'static str>,
}

impl ExperimentSummary {
    pub(super) fn collect(experiment: &ExperimentDir) -> Result<Self, ExperimentError> {
        let spectra = experiment.backend_data()?.len();
        let samples = experiment.sample_data()?.len();
        let links = experiment.links()?.len();
        let chrom_peaks = experiment.chrom_peaks()?.map(|t| t.len());
        let sample_names = experiment.sample_names()?;
        let optional_files = ExperimentFile::ALL
            .iter()
            .filter(|f| !f.is_required() && experiment.has(**f))
            .map(|f| f.file_name())
            .collect();

        Ok(Self {
            spectra,
            samples,
            links,
            chrom_peaks,
            sample_names,
            optional_files,
        })
    }
}

impl fmt::Display for ExperimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Spectra: {}", self.spectra)?;
        writeln!(f, "  Samples: {}", self.samples)?;
        writeln!(f, "  Sample-spectrum links: {}", self.links)?;
        match self.chrom_peaks {
            Some(n) => writeln!(f, "  Chromatographic peaks: {}", n)?,
            None => writeln!(f, "  Chromatographic peaks: none detected")?,
        }
        writeln!(f, "  Sample names: {}", self.sample_names.join(", "))?;
        if self.optional_files.is_empty() {
            write!(f, "  Optional files: none")
        } else {
            write!(f, "  Optional files: {}", self.optional_files.join(", "))
        }
    }
}
