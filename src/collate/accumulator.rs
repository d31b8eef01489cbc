//! Fold state of a collation: the tables absorbed so far and the running offsets.

use log::debug;

use crate::experiment::{ExperimentDir, ExperimentFile};
use crate::ids::{PeakIndex, RowId, SampleIndex, SpectrumIndex};
use crate::schema::SAMPLE;
use crate::table::{requote_like, unquote, LinksTable, RowTable};

use super::CollateError;

/// Number of rows absorbed so far from each indexed table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offsets {
    /// Spectra in `ms_backend_data.txt`
    pub spectra: usize,
    /// Samples in `ms_experiment_sample_data.txt`
    pub samples: usize,
    /// Rows in `xcms_experiment_chrom_peaks.txt`
    pub chrom_peaks: usize,
    /// Rows in `xcms_experiment_chrom_peak_data.txt`
    pub chrom_peak_data: usize,
}

/// The non-empty frames of one row table, tagged with their input index
#[derive(Debug)]
pub(crate) struct TableFrames {
    file: ExperimentFile,
    /// Header lines of the first table read, used when every frame is empty
    template: Option<RowTable>,
    frames: Vec<(usize, RowTable)>,
}

impl TableFrames {
    fn new(file: ExperimentFile) -> Self {
        Self {
            file,
            template: None,
            frames: Vec::new(),
        }
    }

    /// Record one input's table. Returns its row count.
    fn push(&mut self, input: usize, table: RowTable) -> usize {
        let rows = table.len();
        if self.template.is_none() {
            self.template = Some(table.header_only());
        }
        if rows > 0 {
            self.frames.push((input, table));
        }
        rows
    }

    /// The table these frames belong to
    pub(crate) fn file(&self) -> ExperimentFile {
        self.file
    }

    /// Require every frame to have the columns of the first one, in order.
    pub(crate) fn check_columns(&self) -> Result<(), CollateError> {
        let Some(((reference, first), rest)) = self.frames.split_first() else {
            return Ok(());
        };
        for (index, frame) in rest {
            if frame.columns != first.columns {
                return Err(CollateError::ColumnMismatch {
                    file: self.file.file_name(),
                    reference: *reference,
                    reference_columns: join_columns(first),
                    index: *index,
                    columns: join_columns(frame),
                });
            }
        }
        Ok(())
    }

    /// Concatenate the frames under the header of the first one.
    pub(crate) fn concat(self) -> Option<RowTable> {
        let mut frames = self.frames.into_iter().map(|(_, frame)| frame);
        match frames.next() {
            Some(mut merged) => {
                frames.for_each(|frame| merged.append(frame));
                Some(merged)
            }
            None => self.template,
        }
    }
}

fn join_columns(table: &RowTable) -> String {
    table
        .columns
        .iter()
        .map(|c| unquote(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Tables absorbed from the inputs processed so far
#[derive(Debug)]
pub(crate) struct Accumulator {
    pub(crate) offsets: Offsets,
    pub(crate) links: LinksTable,
    pub(crate) backend: TableFrames,
    pub(crate) samples: TableFrames,
    pub(crate) chrom_peaks: TableFrames,
    pub(crate) chrom_peak_data: TableFrames,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            offsets: Offsets::default(),
            links: LinksTable::default(),
            backend: TableFrames::new(ExperimentFile::BackendData),
            samples: TableFrames::new(ExperimentFile::SampleData),
            chrom_peaks: TableFrames::new(ExperimentFile::ChromPeaks),
            chrom_peak_data: TableFrames::new(ExperimentFile::ChromPeakData),
        }
    }
}

impl Accumulator {
    /// Absorb one input, renumbering its rows past the current offsets.
    ///
    /// Every shift uses the offsets as of the start of this input; they only
    /// advance once the whole input has been read.
    pub(crate) fn absorb(mut self, input: usize, experiment: &ExperimentDir) -> Result<Self, CollateError> {
        let start = self.offsets;

        let links = experiment.links()?.offset(start.samples, start.spectra);
        self.links.append(links);

        let mut backend = experiment.backend_data()?;
        backend.relabel(SpectrumIndex::after(start.spectra));
        let spectra = self.backend.push(input, backend);

        let mut chrom_peaks_added = 0;
        if let Some(mut peaks) = experiment.chrom_peaks()? {
            peaks.relabel(PeakIndex::after(start.chrom_peaks));
            shift_samples(&mut peaks, start.samples).map_err(|source| {
                CollateError::InvalidSample {
                    path: experiment.file(ExperimentFile::ChromPeaks),
                    source,
                }
            })?;
            chrom_peaks_added = self.chrom_peaks.push(input, peaks);
        }

        let mut samples = experiment.sample_data()?;
        samples.relabel(SampleIndex::after(start.samples));
        let samples_added = self.samples.push(input, samples);

        let mut peak_data_added = 0;
        if let Some(mut peak_data) = experiment.chrom_peak_data()? {
            peak_data.relabel(PeakIndex::after(start.chrom_peak_data));
            peak_data_added = self.chrom_peak_data.push(input, peak_data);
        }

        debug!(
            "Absorbed {}: {} spectra, {} samples, {} peaks",
            experiment, spectra, samples_added, chrom_peaks_added
        );

        self.offsets = Offsets {
            spectra: start.spectra + spectra,
            samples: start.samples + samples_added,
            chrom_peaks: start.chrom_peaks + chrom_peaks_added,
            chrom_peak_data: start.chrom_peak_data + peak_data_added,
        };
        Ok(self)
    }

    /// Run the column check on all four row tables.
    pub(crate) fn check_columns(&self) -> Result<(), CollateError> {
        self.backend.check_columns()?;
        self.samples.check_columns()?;
        self.chrom_peaks.check_columns()?;
        self.chrom_peak_data.check_columns()
    }
}

/// Add `offset` to the `sample` column of a peak table.
fn shift_samples(peaks: &mut RowTable, offset: usize) -> Result<(), crate::ids::ParseIdError> {
    if offset == 0 {
        return Ok(());
    }
    peaks.map_column(SAMPLE, |value| {
        let sample: SampleIndex = value.parse()?;
        Ok(requote_like(value, &sample.offset(offset).to_string()))
    })?;
    Ok(())
}
