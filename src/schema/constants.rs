/// Format tag written by the backend as the first line of `ms_backend_data.txt`
pub const MS_BACKEND_FORMAT_TAG: &str = "# MsBackendMzR";

/// Expected first line of `ms_experiment_link_mcols.txt`
pub const LINK_MCOLS_HEADER: &str = "\"subsetBy\"";

/// Prefix of chromatographic peak row labels
pub const CHROM_PEAK_LABEL_PREFIX: &str = "CP";

/// Spectra backend table (one row per spectrum)
pub const MS_BACKEND_DATA: &str = "ms_backend_data.txt";

/// Sample data table (one row per sample)
pub const MS_EXPERIMENT_SAMPLE_DATA: &str = "ms_experiment_sample_data.txt";

/// Headerless sample-to-spectrum link table
pub const MS_EXPERIMENT_SAMPLE_DATA_LINKS_SPECTRA: &str =
    "ms_experiment_sample_data_links_spectra.txt";

/// Link metadata columns (experiment-wide)
pub const MS_EXPERIMENT_LINK_MCOLS: &str = "ms_experiment_link_mcols.txt";

/// Spectra processing queue (experiment-wide JSON)
pub const SPECTRA_PROCESSING_QUEUE: &str = "spectra_processing_queue.json";

/// Spectra slot values (experiment-wide)
pub const SPECTRA_SLOTS: &str = "spectra_slots.txt";

/// Processing history of the experiment (optional, experiment-wide JSON)
pub const XCMS_EXPERIMENT_PROCESS_HISTORY: &str = "xcms_experiment_process_history.json";

/// Chromatographic peak table (optional)
pub const XCMS_EXPERIMENT_CHROM_PEAKS: &str = "xcms_experiment_chrom_peaks.txt";

/// Auxiliary per-peak data (optional)
pub const XCMS_EXPERIMENT_CHROM_PEAK_DATA: &str = "xcms_experiment_chrom_peak_data.txt";

/// Feature definitions produced by peak grouping (optional)
pub const XCMS_EXPERIMENT_FEATURE_DEFINITIONS: &str = "xcms_experiment_feature_definitions.txt";

/// Feature-to-peak index produced by peak grouping (optional)
pub const XCMS_EXPERIMENT_FEATURE_PEAK_INDEX: &str = "xcms_experiment_feature_peak_index.txt";

/// Keys expected in `spectra_slots.txt`
pub const SPECTRA_SLOT_KEYS: [&str; 4] = [
    "processingQueueVariables",
    "processing",
    "processingChunkSize",
    "backend",
];

/// Keys every step record of the JSON files must carry
pub const JSON_RECORD_KEYS: [&str; 3] = ["type", "attributes", "value"];
