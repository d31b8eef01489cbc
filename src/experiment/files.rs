use std::fmt;

use crate::schema::*;
use crate::table::RowTableCodec;

/// Every file an experiment directory may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperimentFile {
    /// `ms_backend_data.txt`
    BackendData,
    /// `ms_experiment_sample_data.txt`
    SampleData,
    /// `ms_experiment_sample_data_links_spectra.txt`
    SampleLinks,
    /// `ms_experiment_link_mcols.txt`
    LinkMcols,
    /// `spectra_processing_queue.json`
    ProcessingQueue,
    /// `spectra_slots.txt`
    SpectraSlots,
    /// `xcms_experiment_process_history.json`
    ProcessHistory,
    /// `xcms_experiment_chrom_peaks.txt`
    ChromPeaks,
    /// `xcms_experiment_chrom_peak_data.txt`
    ChromPeakData,
    /// `xcms_experiment_feature_definitions.txt`
    FeatureDefinitions,
    /// `xcms_experiment_feature_peak_index.txt`
    FeaturePeakIndex,
}

impl ExperimentFile {
    /// All files, required ones first
    pub const ALL: [ExperimentFile; 11] = [
        ExperimentFile::BackendData,
        ExperimentFile::SampleData,
        ExperimentFile::SampleLinks,
        ExperimentFile::LinkMcols,
        ExperimentFile::ProcessingQueue,
        ExperimentFile::SpectraSlots,
        ExperimentFile::ProcessHistory,
        ExperimentFile::ChromPeaks,
        ExperimentFile::ChromPeakData,
        ExperimentFile::FeatureDefinitions,
        ExperimentFile::FeaturePeakIndex,
    ];

    /// File name inside the experiment directory
    pub fn file_name(self) -> &'static str {
        match self {
            ExperimentFile::BackendData => MS_BACKEND_DATA,
            ExperimentFile::SampleData => MS_EXPERIMENT_SAMPLE_DATA,
            ExperimentFile::SampleLinks => MS_EXPERIMENT_SAMPLE_DATA_LINKS_SPECTRA,
            ExperimentFile::LinkMcols => MS_EXPERIMENT_LINK_MCOLS,
            ExperimentFile::ProcessingQueue => SPECTRA_PROCESSING_QUEUE,
            ExperimentFile::SpectraSlots => SPECTRA_SLOTS,
            ExperimentFile::ProcessHistory => XCMS_EXPERIMENT_PROCESS_HISTORY,
            ExperimentFile::ChromPeaks => XCMS_EXPERIMENT_CHROM_PEAKS,
            ExperimentFile::ChromPeakData => XCMS_EXPERIMENT_CHROM_PEAK_DATA,
            ExperimentFile::FeatureDefinitions => XCMS_EXPERIMENT_FEATURE_DEFINITIONS,
            ExperimentFile::FeaturePeakIndex => XCMS_EXPERIMENT_FEATURE_PEAK_INDEX,
        }
    }

    /// Whether every experiment directory must contain this file
    pub fn is_required(self) -> bool {
        matches!(
            self,
            ExperimentFile::BackendData
                | ExperimentFile::SampleData
                | ExperimentFile::SampleLinks
                | ExperimentFile::LinkMcols
                | ExperimentFile::ProcessingQueue
                | ExperimentFile::SpectraSlots
        )
    }

    /// Whether the file is an experiment-wide constant rather than a row table
    pub fn is_global(self) -> bool {
        matches!(
            self,
            ExperimentFile::LinkMcols
                | ExperimentFile::ProcessingQueue
                | ExperimentFile::SpectraSlots
                | ExperimentFile::ProcessHistory
        )
    }

    /// Whether the file holds chromatographic peak or feature grouping results
    pub fn is_feature_grouping(self) -> bool {
        matches!(
            self,
            ExperimentFile::FeatureDefinitions | ExperimentFile::FeaturePeakIndex
        )
    }

    /// Codec for the labelled row tables, `None` for the other files
    pub fn codec(self) -> Option<RowTableCodec> {
        match self {
            ExperimentFile::BackendData => Some(RowTableCodec::new(1)),
            ExperimentFile::SampleData
            | ExperimentFile::ChromPeaks
            | ExperimentFile::ChromPeakData
            | ExperimentFile::FeatureDefinitions
            | ExperimentFile::FeaturePeakIndex => Some(RowTableCodec::new(0)),
            _ => None,
        }
    }
}

impl fmt::Display for ExperimentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
