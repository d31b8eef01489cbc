//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use xcms_experiment::engine::{Engine, EngineError, Invocation};
use xcms_experiment::experiment::{ExperimentDir, ExperimentFile};
use xcms_experiment::schema::{BACKEND_REQUIRED_COLUMNS, CHROM_PEAK_COLUMNS, CHROM_PEAK_DATA_COLUMNS};

const SPECTRA_SLOTS: &str = "processingQueueVariables = rtime, msLevel\nprocessing = Merge MsBackendMzR\nprocessingChunkSize = Inf\nbackend = MsBackendMzR\n";
const LINK_MCOLS: &str = "\"subsetBy\"\n\"1\"\n";
const QUEUE: &str = "[\"{\\\"type\\\":\\\"list\\\",\\\"attributes\\\":{},\\\"value\\\":[]}\"]\n";

fn quoted(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join("\t")
}

/// Write an experiment with `spectra` spectra per sample and, optionally,
/// `peaks` chromatographic peaks per sample.
pub fn write_experiment(
    path: &Path,
    samples: &[(&str, usize)],
    peaks: Option<usize>,
    history_date: &str,
) -> ExperimentDir {
    let experiment = ExperimentDir::create(path).unwrap();
    let raw = |name: &str| format!("\"/data/raw/{}.mzML\"", name);

    let mut backend = format!("# MsBackendMzR\n{}\n", quoted(&BACKEND_REQUIRED_COLUMNS));
    let mut sample_data = "\"sample_name\"\t\"sample_group\"\t\"spectraOrigin\"\n".to_string();
    let mut links = String::new();
    let mut spectrum = 0;
    for (i, (name, spectra)) in samples.iter().enumerate() {
        sample_data.push_str(&format!("\"{}\"\t\"{}\"\t\"KO\"\t{}\n", i + 1, name, raw(name)));
        for scan in 1..=*spectra {
            spectrum += 1;
            let values: Vec<String> = BACKEND_REQUIRED_COLUMNS
                .iter()
                .map(|column| match *column {
                    "msLevel" => "1".to_string(),
                    "rtime" => format!("{:.2}", 2500.0 + scan as f64 * 1.56),
                    "acquisitionNum" | "scanIndex" => scan.to_string(),
                    "dataOrigin" | "dataStorage" => raw(name),
                    "spectrumId" => format!("\"spectrum={}\"", scan),
                    "precursorMz" | "precursorIntensity" | "precursorCharge" => "NA".to_string(),
                    _ => "0".to_string(),
                })
                .collect();
            backend.push_str(&format!("\"{}\"\t{}\n", spectrum, values.join("\t")));
            links.push_str(&format!("{}\t{}\n", i + 1, spectrum));
        }
    }
    fs::write(experiment.file(ExperimentFile::BackendData), backend).unwrap();
    fs::write(experiment.file(ExperimentFile::SampleData), sample_data).unwrap();
    fs::write(experiment.file(ExperimentFile::SampleLinks), links).unwrap();
    fs::write(experiment.file(ExperimentFile::SpectraSlots), SPECTRA_SLOTS).unwrap();
    fs::write(experiment.file(ExperimentFile::LinkMcols), LINK_MCOLS).unwrap();
    fs::write(experiment.file(ExperimentFile::ProcessingQueue), QUEUE).unwrap();
    fs::write(
        experiment.file(ExperimentFile::ProcessHistory),
        history(history_date),
    )
    .unwrap();

    if let Some(peaks) = peaks {
        let mut chrom_peaks = format!("{}\n", quoted(&CHROM_PEAK_COLUMNS));
        let mut peak_data = format!("{}\n", quoted(&CHROM_PEAK_DATA_COLUMNS));
        let mut peak = 0;
        for sample in 1..=samples.len() {
            for p in 0..peaks {
                peak += 1;
                let mz = 300.0 + p as f64 * 0.5;
                chrom_peaks.push_str(&format!(
                    "\"CP{}\"\t{}\t{}\t{}\t2600\t2590\t2610\t5000\t4800\t900\t30\t{}\n",
                    peak,
                    mz,
                    mz - 0.01,
                    mz + 0.01,
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

/// Process history with one step recorded at `date`.
pub fn history(date: &str) -> String {
    let step = serde_json::json!({
        "type": "list",
        "attributes": {},
        "value": [{
            "type": "S4",
            "attributes": {
                "type": {"type": "character", "attributes": {}, "value": ["Peak detection"]},
                "date": {"type": "character", "attributes": {}, "value": [date]}
            },
            "value": []
        }]
    });
    format!("[{}]\n", serde_json::to_string(&step.to_string()).unwrap())
}

/// Engine running a closure instead of a script.
pub struct ClosureEngine<F>(pub F);

impl<F> Engine for ClosureEngine<F>
where
    F: Fn(&Invocation) -> Result<(), EngineError>,
{
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError> {
        (self.0)(invocation)
    }
}
