/// Column names as constants for type safety
// ms_backend_data.txt
/// MS level (1 for MS1, 2 for MS/MS, etc.)
pub const MS_LEVEL: &str = "msLevel";
/// Retention time in seconds
pub const RTIME: &str = "rtime";
/// Retention time after alignment
pub const RTIME_ADJUSTED: &str = "rtime_adjusted";
/// Raw file the spectrum was read from
pub const DATA_ORIGIN: &str = "dataOrigin";
/// Raw file the spectrum data is stored in
pub const DATA_STORAGE: &str = "dataStorage";
/// Centroided flag
pub const CENTROIDED: &str = "centroided";

/// Columns `ms_backend_data.txt` must contain (at least)
pub const BACKEND_REQUIRED_COLUMNS: [&str; 21] = [
    MS_LEVEL,
    RTIME,
    "acquisitionNum",
    DATA_ORIGIN,
    "polarity",
    "precScanNum",
    "precursorMz",
    "precursorIntensity",
    "precursorCharge",
    "collisionEnergy",
    "peaksCount",
    "totIonCurrent",
    "basePeakMZ",
    "basePeakIntensity",
    "ionisationEnergy",
    "lowMZ",
    "highMZ",
    "injectionTime",
    "spectrumId",
    DATA_STORAGE,
    "scanIndex",
];

/// Path-bearing columns of `ms_backend_data.txt`
pub const BACKEND_PATH_COLUMNS: [&str; 2] = [DATA_ORIGIN, DATA_STORAGE];

// ms_experiment_sample_data.txt
/// Raw file a sample originates from
pub const SPECTRA_ORIGIN: &str = "spectraOrigin";
/// Number of columns of the sample data table
pub const SAMPLE_DATA_COLUMN_COUNT: usize = 3;
/// Path-bearing columns of `ms_experiment_sample_data.txt`
pub const SAMPLE_PATH_COLUMNS: [&str; 1] = [SPECTRA_ORIGIN];

// xcms_experiment_chrom_peaks.txt
/// Sample index a chromatographic peak was detected in
pub const SAMPLE: &str = "sample";
/// Exact column list of `xcms_experiment_chrom_peaks.txt`
pub const CHROM_PEAK_COLUMNS: [&str; 11] = [
    "mz", "mzmin", "mzmax", "rt", "rtmin", "rtmax", "into", "intb", "maxo", "sn", SAMPLE,
];

/// Exact column list of `xcms_experiment_chrom_peak_data.txt`
pub const CHROM_PEAK_DATA_COLUMNS: [&str; 2] = ["ms_level", "is_filled"];

/// Columns `xcms_experiment_feature_definitions.txt` must contain (at least)
pub const FEATURE_DEFINITION_COLUMNS: [&str; 9] = [
    "mzmed", "mzmin", "mzmax", "rtmed", "rtmin", "rtmax", "npeaks", "peakidx", "ms_level",
];

/// Exact column list of `xcms_experiment_feature_peak_index.txt`
pub const FEATURE_PEAK_INDEX_COLUMNS: [&str; 2] = ["feature_index", "peak_index"];

// spectral metadata export
/// Label column of the exported spectral metadata
pub const ID: &str = "id";
/// Sample index column added to the exported spectral metadata
pub const SAMPLE_ID: &str = "sample_id";
/// Retention time shift column added when aligned retention times exist
pub const RTIME_SHIFT: &str = "rtime_adjusted-rtime";
