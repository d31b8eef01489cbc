//! Synthetic experiment directories for unit tests.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use crate::engine::{Engine, EngineError, Invocation};
use crate::experiment::{ExperimentDir, ExperimentFile};
use crate::schema::{BACKEND_REQUIRED_COLUMNS, CHROM_PEAK_COLUMNS, CHROM_PEAK_DATA_COLUMNS};

pub(crate) const SPECTRA_SLOTS_TEXT: &str = "processingQueueVariables = rtime, msLevel\nprocessing = Merge MsBackendMzR\nprocessingChunkSize = Inf\nbackend = MsBackendMzR\n";

pub(crate) const LINK_MCOLS_TEXT: &str = "\"subsetBy\"\n\"1\"\n";

pub(crate) const PROCESSING_QUEUE_TEXT: &str =
    "[\"{\\\"type\\\":\\\"list\\\",\\\"attributes\\\":{},\\\"value\\\":[]}\"]\n";

/// Builds an experiment directory with one raw file per sample.
pub(crate) struct ExperimentBuilder {
    samples: Vec<(String, usize)>,
    peaks_per_sample: Option<usize>,
    history_date: Option<String>,
    raw_dir: String,
    extra_backend_column: Option<String>,
}

impl ExperimentBuilder {
    pub(crate) fn new() -> Self {
        Self {
            samples: Vec::new(),
            peaks_per_sample: None,
            history_date: None,
            raw_dir: "/raw".to_string(),
            extra_backend_column: None,
        }
    }

    pub(crate) fn sample(mut self, name: &str, spectra: usize) -> Self {
        self.samples.push((name.to_string(), spectra));
        self
    }

    /// Write peak files; `0` writes header-only tables.
    pub(crate) fn peaks_per_sample(mut self, peaks: usize) -> Self {
        self.peaks_per_sample = Some(peaks);
        self
    }

    pub(crate) fn history_date(mut self, date: &str) -> Self {
        self.history_date = Some(date.to_string());
        self
    }

    pub(crate) fn raw_dir(mut self, dir: &str) -> Self {
        self.raw_dir = dir.to_string();
        self
    }

    pub(crate) fn extra_backend_column(mut self, name: &str) -> Self {
        self.extra_backend_column = Some(name.to_string());
        self
    }

    pub(crate) fn write(&self, path: &Path) -> ExperimentDir {
        let experiment = ExperimentDir::create(path).unwrap();

        let raw_file = |name: &str| format!("\"{}/{}.mzML\"", self.raw_dir, name);

        // backend
        let mut columns: Vec<String> = BACKEND_REQUIRED_COLUMNS
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect();
        if let Some(extra) = &self.extra_backend_column {
            columns.push(format!("\"{}\"", extra));
        }
        let mut backend = format!("# MsBackendMzR\n{}\n", columns.join("\t"));
        let mut spectrum = 0;
        for (name, spectra) in &self.samples {
            for scan in 1..=*spectra {
                spectrum += 1;
                let mut values = vec![format!("\"{}\"", spectrum)];
                for column in BACKEND_REQUIRED_COLUMNS {
                    values.push(match column {
                        "msLevel" => (if scan % 5 == 0 { "2" } else { "1" }).to_string(),
                        "rtime" => format!("{:.3}", scan as f64 * 1.565),
                        "acquisitionNum" | "scanIndex" => scan.to_string(),
                        "dataOrigin" | "dataStorage" => raw_file(name),
                        "spectrumId" => format!("\"scan={}\"", scan),
                        "precursorMz" | "precursorIntensity" | "precursorCharge" => "NA".to_string(),
                        _ => "0".to_string(),
                    });
                }
                if self.extra_backend_column.is_some() {
                    values.push("FALSE".to_string());
                }
                backend.push_str(&values.join("\t"));
                backend.push('\n');
            }
        }
        fs::write(experiment.file(ExperimentFile::BackendData), backend).unwrap();

        // samples
        let mut samples = "\"sample_name\"\t\"sample_group\"\t\"spectraOrigin\"\n".to_string();
        for (i, (name, _)) in self.samples.iter().enumerate() {
            samples.push_str(&format!(
                "\"{}\"\t\"{}\"\t\"{}\"\t{}\n",
                i + 1,
                name,
                &name[..2.min(name.len())].to_uppercase(),
                raw_file(name)
            ));
        }
        fs::write(experiment.file(ExperimentFile::SampleData), samples).unwrap();

        // links
        let mut links = String::new();
        let mut spectrum = 0;
        for (i, (_, spectra)) in self.samples.iter().enumerate() {
            for _ in 0..*spectra {
                spectrum += 1;
                links.push_str(&format!("{}\t{}\n", i + 1, spectrum));
            }
        }
        fs::write(experiment.file(ExperimentFile::SampleLinks), links).unwrap();

        fs::write(experiment.file(ExperimentFile::SpectraSlots), SPECTRA_SLOTS_TEXT).unwrap();
        fs::write(experiment.file(ExperimentFile::LinkMcols), LINK_MCOLS_TEXT).unwrap();
        fs::write(experiment.file(ExperimentFile::ProcessingQueue), PROCESSING_QUEUE_TEXT).unwrap();

        if let Some(date) = &self.history_date {
            fs::write(
                experiment.file(ExperimentFile::ProcessHistory),
                process_history(date),
            )
            .unwrap();
        }

        if let Some(peaks) = self.peaks_per_sample {
            let quoted = |cols: &[&str]| {
                cols.iter()
                    .map(|c| format!("\"{}\"", c))
                    .collect::<Vec<_>>()
                    .join("\t")
            };
            let mut chrom_peaks = format!("{}\n", quoted(&CHROM_PEAK_COLUMNS));
            let mut peak_data = format!("{}\n", quoted(&CHROM_PEAK_DATA_COLUMNS));
            let mut peak = 0;
            for sample in 1..=self.samples.len() {
                for p in 0..peaks {
                    peak += 1;
                    chrom_peaks.push_str(&format!(
                        "\"CP{}\"\t{:.4}\t{:.4}\t{:.4}\t{}\t{}\t{}\t1000\t900\t250\t12\t{}\n",
                        peak,
                        200.0 + p as f64,
                        199.9 + p as f64,
                        200.1 + p as f64,
                        10 + p,
                        8 + p,
                        12 + p,
                        sample
                    ));
                    peak_data.push_str(&format!("\"CP{}\"\t1\tFALSE\n", peak));
                }
            }
            fs::write(experiment.file(ExperimentFile::ChromPeaks), chrom_peaks).unwrap();
            fs::write(experiment.file(ExperimentFile::ChromPeakData), peak_data).unwrap();
        }

        experiment
    }
}

/// A process history with one peak detection step performed at `date`.
pub(crate) fn process_history(date: &str) -> String {
    let step = serde_json::json!({
        "type": "list",
        "attributes": {},
        "value": [{
            "type": "S4",
            "attributes": {
                "type": {"type": "character", "attributes": {}, "value": ["Peak detection"]},
                "date": {"type": "character", "attributes": {}, "value": [date]},
                "fileIndex": {"type": "integer", "attributes": {}, "value": [1]}
            },
            "value": []
        }]
    });
    let encoded = serde_json::to_string(&step.to_string()).unwrap();
    format!("[{}]\n", encoded)
}

/// An engine that records invocations and runs `behaviour` instead of a script.
pub(crate) struct FakeEngine<F> {
    pub(crate) calls: RefCell<Vec<Invocation>>,
    behaviour: F,
}

pub(crate) fn fake_engine<F>(behaviour: F) -> FakeEngine<F>
where
    F: Fn(&Invocation) -> Result<(), EngineError>,
{
    FakeEngine {
        calls: RefCell::new(Vec::new()),
        behaviour,
    }
}

impl<F> Engine for FakeEngine<F>
where
    F: Fn(&Invocation) -> Result<(), EngineError>,
{
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError> {
        self.calls.borrow_mut().push(invocation.clone());
        (self.behaviour)(invocation)
    }
}
