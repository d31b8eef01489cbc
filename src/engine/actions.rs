//! Parameter sets of the engine scripts.
//!
//! Every action is a plain struct whose fields are the script's parameters,
//! with the defaults of the upstream XCMS and MetaboAnnotation wrappers.
//! Fields set to `None` are left off the command line so the script falls back
//! to the package default.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::experiment::ExperimentDir;
use crate::paths::sample_name;
use crate::table::unquote;

use super::{Engine, EngineError, Invocation, ParamValue};

const XCMS: &str = "XCMS";

/// Inputs an action may consume
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    /// Directory of raw spectra files
    pub spectra: Option<PathBuf>,
    /// Experiment produced by a previous step
    pub experiment: Option<ExperimentDir>,
    /// Reference spectra library to match against
    pub target_spectra: Option<PathBuf>,
}

/// An engine script and its parameters
pub trait Action: Serialize {
    /// Script name without extension
    const SCRIPT: &'static str;
    /// Package named in failure messages
    const PACKAGE: &'static str = XCMS;
    /// Parameter carrying the input experiment, `None` if the action reads raw spectra only
    const EXPERIMENT_PARAM: Option<&'static str> = Some("xcms_experiment");
    /// Parameter carrying the output directory
    const OUTPUT_PARAM: &'static str = "output_path";
    /// Whether the action needs a reference spectra library
    const NEEDS_TARGET_SPECTRA: bool = false;

    /// Validate the inputs before anything is created.
    fn check(&self, _inputs: &ActionInputs) -> Result<(), EngineError> {
        Ok(())
    }

    /// Build the script call writing its result to `output`.
    fn invocation(&self, inputs: &ActionInputs, output: &Path) -> Result<Invocation, EngineError> {
        let missing = |input| EngineError::MissingInput {
            action: Self::SCRIPT,
            input,
        };

        let spectra = inputs.spectra.as_deref().ok_or_else(|| missing("spectra"))?;
        let mut invocation = Invocation::new(Self::SCRIPT, Self::PACKAGE).param("spectra", spectra);

        if let Some(key) = Self::EXPERIMENT_PARAM {
            let experiment = inputs
                .experiment
                .as_ref()
                .ok_or_else(|| missing("xcms_experiment"))?;
            invocation = invocation.param(key, experiment.path());
        }
        if Self::NEEDS_TARGET_SPECTRA {
            let target = inputs
                .target_spectra
                .as_deref()
                .ok_or_else(|| missing("target_spectra"))?;
            invocation = invocation.param("target_spectra", target);
        }

        invocation = append_params(invocation, self)?;
        Ok(invocation.param(Self::OUTPUT_PARAM, output))
    }
}

/// Append every field of `action` that has a value.
fn append_params<A: Serialize + ?Sized>(mut invocation: Invocation, action: &A) -> Result<Invocation, EngineError> {
    let Value::Object(fields) = serde_json::to_value(action)? else {
        return Ok(invocation);
    };
    for (key, value) in fields {
        let value: Option<ParamValue> = match value {
            Value::Null => None,
            Value::Bool(b) => Some(b.into()),
            Value::String(s) => Some(s.into()),
            other => Some(other.to_string().into()),
        };
        invocation = invocation.opt_param(key, value);
    }
    Ok(invocation)
}

/// Run `action` through `engine`, writing its result to a new directory at `output`.
///
/// The output directory is removed again if the script fails.
pub fn run_action<E, A>(
    engine: &E,
    action: &A,
    inputs: &ActionInputs,
    output: impl AsRef<Path>,
) -> Result<PathBuf, EngineError>
where
    E: Engine + ?Sized,
    A: Action,
{
    action.check(inputs)?;
    let invocation = action.invocation(inputs, output.as_ref())?;

    let output = ExperimentDir::create(output)?;
    if let Err(e) = engine.run(&invocation) {
        let path = output.path().to_path_buf();
        if let Err(cleanup) = output.remove() {
            warn!("Could not remove {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }

    info!("{} finished: {}", A::SCRIPT, output);
    Ok(output.path().to_path_buf())
}

/// Import raw spectra into a new experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadMsExperiment {
    /// Tab-separated sample metadata; the first column holds the sample IDs
    pub sample_metadata: Option<PathBuf>,
}

impl Action for ReadMsExperiment {
    const SCRIPT: &'static str = "read_ms_experiment";
    const EXPERIMENT_PARAM: Option<&'static str> = None;

    fn check(&self, inputs: &ActionInputs) -> Result<(), EngineError> {
        match (&self.sample_metadata, &inputs.spectra) {
            (Some(metadata), Some(spectra)) => validate_sample_metadata(metadata, spectra),
            _ => Ok(()),
        }
    }
}

/// Require the sample IDs of a metadata table to match the spectra file names.
pub fn validate_sample_metadata(metadata: &Path, spectra: &Path) -> Result<(), EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(metadata)?;
    let mut metadata_ids = BTreeSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(id) = record.get(0).map(|id| unquote(id.trim())) {
            // metadata directives such as "#q2:types"
            if !id.is_empty() && !id.starts_with('#') {
                metadata_ids.insert(id.to_string());
            }
        }
    }

    let mut spectra_ids = BTreeSet::new();
    for entry in fs::read_dir(spectra)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            spectra_ids.insert(sample_name(&entry.file_name().to_string_lossy()));
        }
    }

    let missing_in_metadata: Vec<String> = spectra_ids.difference(&metadata_ids).cloned().collect();
    let missing_in_spectra: Vec<String> = metadata_ids.difference(&spectra_ids).cloned().collect();
    if missing_in_metadata.is_empty() && missing_in_spectra.is_empty() {
        Ok(())
    } else {
        Err(EngineError::SampleMetadataMismatch {
            missing_in_metadata,
            missing_in_spectra,
        })
    }
}

/// Chromatographic peak detection with the centWave algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindPeaksCentWave {
    /// Maximal m/z deviation in consecutive scans, in ppm
    pub ppm: f64,
    /// Minimal peak width in seconds
    pub min_peak_width: f64,
    /// Maximal peak width in seconds
    pub max_peak_width: f64,
    /// Minimal signal-to-noise ratio
    pub sn_thresh: f64,
    /// Prefilter: number of peaks that must reach `prefilter_i`
    pub prefilter_k: f64,
    /// Prefilter: intensity threshold
    pub prefilter_i: f64,
    /// Function computing the m/z centre
    pub mz_center_fun: String,
    /// Integration method (1 or 2)
    pub integrate: i64,
    /// Minimal m/z difference of overlapping peaks
    pub mz_diff: f64,
    /// Fit a Gaussian to each peak
    pub fit_gauss: bool,
    /// Minimal intensity of a centroid
    pub noise: f64,
    /// Apply the baseline check
    pub first_baseline_check: bool,
    /// MS level to detect peaks on
    pub ms_level: i64,
    /// Extend the wavelet scales when using MSW
    pub extend_length_msw: bool,
    /// Report additional peak columns
    pub verbose_columns: bool,
    /// Report the beta columns
    pub verbose_beta_columns: bool,
    /// Worker threads of the engine
    pub threads: i64,
}

impl Default for FindPeaksCentWave {
    fn default() -> Self {
        Self {
            ppm: 25.0,
            min_peak_width: 20.0,
            max_peak_width: 50.0,
            sn_thresh: 10.0,
            prefilter_k: 3.0,
            prefilter_i: 100.0,
            mz_center_fun: "wMean".to_string(),
            integrate: 1,
            mz_diff: -0.001,
            fit_gauss: false,
            noise: 0.0,
            first_baseline_check: true,
            ms_level: 1,
            extend_length_msw: false,
            verbose_columns: false,
            verbose_beta_columns: false,
            threads: 1,
        }
    }
}

impl Action for FindPeaksCentWave {
    const SCRIPT: &'static str = "find_peaks_centwave";
    const OUTPUT_PARAM: &'static str = "xcms_experiment_peaks";
}

/// Retention time alignment with Obiwarp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustRetentionTimeObiwarp {
    /// Bin size in the m/z dimension
    pub bin_size: f64,
    /// Index of the sample all others are aligned to
    pub center_sample: Option<i64>,
    /// Responsiveness of warping
    pub response: f64,
    /// Distance function
    pub dist_fun: String,
    /// Gap penalty for opening a gap
    pub gap_init: Option<f64>,
    /// Gap penalty for extending a gap
    pub gap_extend: Option<f64>,
    /// Multiplier of the diagonal moves
    pub factor_diag: f64,
    /// Multiplier of the gap moves
    pub factor_gap: f64,
    /// Use local instead of global alignment
    pub local_alignment: bool,
    /// Penalty for initiating an alignment
    pub init_penalty: f64,
    /// Samples used for alignment
    pub subset: Option<i64>,
    /// How samples outside the subset are adjusted
    pub subset_adjust: Option<String>,
    /// Maximal allowed retention time gap between consecutive spectra
    pub rtime_difference_threshold: f64,
    /// Samples processed per chunk
    pub chunk_size: i64,
    /// Worker threads of the engine
    pub threads: i64,
}

impl Default for AdjustRetentionTimeObiwarp {
    fn default() -> Self {
        Self {
            bin_size: 25.0,
            center_sample: None,
            response: 1.0,
            dist_fun: "cor_opt".to_string(),
            gap_init: None,
            gap_extend: None,
            factor_diag: 2.0,
            factor_gap: 1.0,
            local_alignment: false,
            init_penalty: 0.0,
            subset: None,
            subset_adjust: None,
            rtime_difference_threshold: 5.0,
            chunk_size: 1,
            threads: 1,
        }
    }
}

impl Action for AdjustRetentionTimeObiwarp {
    const SCRIPT: &'static str = "adjust_retention_time_obiwarp";
    const EXPERIMENT_PARAM: Option<&'static str> = Some("chromatographic_peaks");
}

/// Correspondence analysis with the peak density method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPeaksDensity {
    /// Bandwidth of the smoothing kernel
    pub bw: f64,
    /// Minimal fraction of samples of a group a feature must be found in
    pub min_fraction: f64,
    /// Minimal number of samples of a group a feature must be found in
    pub min_samples: f64,
    /// Width of the overlapping m/z slices
    pub bin_size: f64,
    /// Maximal number of features per m/z slice
    pub max_features: f64,
    /// Worker threads of the engine
    pub threads: i64,
    /// MS level to group peaks on
    pub ms_level: i64,
}

impl Default for GroupPeaksDensity {
    fn default() -> Self {
        Self {
            bw: 30.0,
            min_fraction: 0.5,
            min_samples: 1.0,
            bin_size: 0.25,
            max_features: 50.0,
            threads: 1,
            ms_level: 1,
        }
    }
}

impl Action for GroupPeaksDensity {
    const SCRIPT: &'static str = "group_peaks_density";
}

/// Gap filling by integrating the signal in the feature area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillPeaksArea {
    /// R function computing the lower m/z bound
    pub mz_min: String,
    /// R function computing the upper m/z bound
    pub mz_max: String,
    /// R function computing the lower retention time bound
    pub rt_min: String,
    /// R function computing the upper retention time bound
    pub rt_max: String,
    /// Worker threads of the engine
    pub threads: i64,
    /// MS level to fill peaks on
    pub ms_level: i64,
}

impl Default for FillPeaksArea {
    fn default() -> Self {
        Self {
            mz_min: "function(z) quantile(z, probs = 0.25)".to_string(),
            mz_max: "function(z) quantile(z, probs = 0.75)".to_string(),
            rt_min: "function(z) quantile(z, probs = 0.25)".to_string(),
            rt_max: "function(z) quantile(z, probs = 0.75)".to_string(),
            threads: 1,
            ms_level: 1,
        }
    }
}

impl Action for FillPeaksArea {
    const SCRIPT: &'static str = "fill_peaks_area";
}

/// Annotation of MS2 spectra against a reference library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSpectra {
    /// Peak mapping function
    pub map_fun: String,
    /// Absolute m/z tolerance
    pub tolerance: Option<f64>,
    /// Relative m/z tolerance in ppm
    pub ppm: Option<f64>,
    /// Similarity function
    pub fun: String,
    /// Weight of the m/z values in the similarity
    pub fun_m: f64,
    /// Weight of the intensities in the similarity
    pub fun_n: f64,
    /// Remove missing values before scoring
    pub fun_na_rm: bool,
    /// Only compare spectra with matching precursor m/z
    pub require_precursor: bool,
    /// Require the precursor m/z as a peak of the target spectrum
    pub require_precursor_peak: bool,
    /// R function selecting the reported matches
    pub thresh_fun: String,
    /// Absolute retention time tolerance
    pub tolerance_rt: Option<f64>,
    /// Relative retention time tolerance in percent
    pub percent_rt: Option<f64>,
    /// Scale intensities to a total of 1 before scoring
    pub scale_peaks: bool,
    /// Drop peaks below this intensity
    pub intensity_threshold: Option<f64>,
    /// Drop spectra with fewer peaks than this
    pub num_peaks_threshold: Option<i64>,
    /// Worker threads of the engine
    pub threads: i64,
}

impl Default for MatchSpectra {
    fn default() -> Self {
        Self {
            map_fun: "join_peaks".to_string(),
            tolerance: None,
            ppm: None,
            fun: "ndotproduct".to_string(),
            fun_m: 0.0,
            fun_n: 0.5,
            fun_na_rm: true,
            require_precursor: true,
            require_precursor_peak: false,
            thresh_fun: "function(x) which(x >= 0.7)".to_string(),
            tolerance_rt: None,
            percent_rt: None,
            scale_peaks: false,
            intensity_threshold: None,
            num_peaks_threshold: None,
            threads: 1,
        }
    }
}

impl Action for MatchSpectra {
    const SCRIPT: &'static str = "match_spectra";
    const PACKAGE: &'static str = "MetaboAnnotation";
    const OUTPUT_PARAM: &'static str = "matched_spectra";
    const NEEDS_TARGET_SPECTRA: bool = true;
}
