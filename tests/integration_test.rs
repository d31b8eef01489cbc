//! Integration tests for xcms-experiment
//!
//! These tests run whole workflows on experiment directories written to disk.

mod common;

use std::fs;
use std::path::Path;

use common::{write_experiment, ClosureEngine};
use tempfile::tempdir;
use xcms_experiment::collate::collate;
use xcms_experiment::engine::actions::{run_action, ActionInputs, FindPeaksCentWave};
use xcms_experiment::engine::{EngineError, Invocation};
use xcms_experiment::experiment::{ExperimentDir, ExperimentFile};
use xcms_experiment::metadata::spectral_metadata;
use xcms_experiment::partition::{partition, PartitionKey};
use xcms_experiment::paths::{create_placeholder_spectra, rewrite_spectra_paths};
use xcms_experiment::validator::validate_experiment;

const SAMPLES: [(&str, usize); 5] = [
    ("ko15", 6),
    ("ko16", 6),
    ("wt15", 5),
    ("wt16", 5),
    ("wt17", 4),
];

/// Writes each requested partition the way the engine script would.
fn partition_engine() -> ClosureEngine<impl Fn(&Invocation) -> Result<(), EngineError>> {
    ClosureEngine(|invocation: &Invocation| {
        let outputs: Vec<String> =
            serde_json::from_str(invocation.get("output_paths").unwrap()).unwrap();
        let groups: Vec<Vec<usize>> =
            serde_json::from_str(invocation.get("partition_indices").unwrap()).unwrap();
        for (k, (output, group)) in outputs.iter().zip(&groups).enumerate() {
            let samples: Vec<(&str, usize)> = group.iter().map(|&i| SAMPLES[i]).collect();
            write_experiment(
                Path::new(output),
                &samples,
                Some(3),
                &format!("Tue Mar {} 09:00:00 2025", k + 1),
            );
        }
        Ok(())
    })
}

fn read(experiment: &ExperimentDir, file: ExperimentFile) -> String {
    fs::read_to_string(experiment.file(file)).unwrap()
}

/// Partitioning and collating the partitions restores every row table
#[test]
fn test_partition_then_collate_restores_tables() {
    let dir = tempdir().unwrap();
    let original = write_experiment(&dir.path().join("all"), &SAMPLES, Some(3), "Mon Mar 3 2025");

    let partitions = partition(&original, Some(2), dir.path().join("parts"), &partition_engine()).unwrap();
    assert_eq!(
        partitions.keys().cloned().collect::<Vec<_>>(),
        vec![PartitionKey::Number(1), PartitionKey::Number(2)]
    );
    assert_eq!(
        partitions[&PartitionKey::Number(1)].sample_names().unwrap(),
        vec!["ko15", "ko16", "wt15"]
    );

    let parts: Vec<ExperimentDir> = partitions.into_values().collect();
    let collated = collate(&parts, dir.path().join("collated")).unwrap();

    for file in [
        ExperimentFile::BackendData,
        ExperimentFile::SampleData,
        ExperimentFile::SampleLinks,
        ExperimentFile::ChromPeaks,
        ExperimentFile::ChromPeakData,
    ] {
        assert_eq!(read(&collated, file), read(&original, file), "{}", file);
    }
    // Histories differ only in their dates; the first partition's copy is kept
    assert_eq!(
        read(&collated, ExperimentFile::ProcessHistory),
        read(&parts[0], ExperimentFile::ProcessHistory)
    );
}

/// A collated experiment passes validation and exports consistent metadata
#[test]
fn test_collated_experiment_is_valid() {
    let dir = tempdir().unwrap();
    let inputs: Vec<ExperimentDir> = SAMPLES
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            write_experiment(
                &dir.path().join(format!("in{}", i)),
                &[*sample],
                Some(2),
                "Wed Apr 2 2025",
            )
        })
        .collect();

    let collated = collate(&inputs, dir.path().join("collated")).unwrap();

    let report = validate_experiment(collated.path()).unwrap();
    assert!(!report.has_failures(), "{}", report);

    let summary = collated.summary().unwrap();
    assert_eq!(summary.spectra, 26);
    assert_eq!(summary.samples, 5);
    assert_eq!(summary.chrom_peaks, Some(10));

    let metadata = spectral_metadata(&collated, None).unwrap();
    let sample_ids = metadata.column("sample_id").unwrap();
    assert_eq!(sample_ids.first(), Some(&"1"));
    assert_eq!(sample_ids.last(), Some(&"5"));
    assert_eq!(metadata.column("sample_name").unwrap()[12], "wt15");
}

/// Relocated experiments point placeholders and metadata at the new directory
#[test]
fn test_rewrite_paths_and_placeholders() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(&dir.path().join("exp"), &SAMPLES[..2], None, "Thu 2025");
    let new_base = dir.path().join("spectra");

    let cells = rewrite_spectra_paths(&experiment, &new_base).unwrap();
    assert_eq!(cells, 12 * 2 + 2);

    let metadata = spectral_metadata(&experiment, None).unwrap();
    let expected = new_base.join("ko16.mzML");
    assert_eq!(
        metadata.column("dataStorage").unwrap()[11],
        expected.to_str().unwrap()
    );

    let created = create_placeholder_spectra(&experiment, dir.path().join("fake")).unwrap();
    let names: Vec<_> = created
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["ko15.mzML", "ko16.mzML"]);
    assert!(created.iter().all(|p| fs::metadata(p).unwrap().len() == 0));
}

/// Engine actions hand their output directory to the script
#[test]
fn test_run_action_with_engine() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(&dir.path().join("exp"), &SAMPLES[..1], None, "Fri 2025");
    let output = dir.path().join("peaks");

    let engine = ClosureEngine(|invocation: &Invocation| {
        assert_eq!(invocation.script_file(), "find_peaks_centwave.R");
        assert_eq!(invocation.get("ppm"), Some("25.0"));
        let output = invocation.get("xcms_experiment_peaks").unwrap();
        write_experiment(Path::new(output), &SAMPLES[..1], Some(4), "Fri 2025");
        Ok(())
    });
    let inputs = ActionInputs {
        spectra: Some(dir.path().join("raw")),
        experiment: Some(experiment),
        target_spectra: None,
    };

    let result = run_action(&engine, &FindPeaksCentWave::default(), &inputs, &output).unwrap();

    assert_eq!(result, output);
    let peaks = ExperimentDir::open(&result).unwrap();
    assert_eq!(peaks.chrom_peaks().unwrap().unwrap().len(), 4);
}

/// A failing partition script leaves the workspace empty
#[test]
fn test_failed_partition_cleans_up() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(&dir.path().join("exp"), &SAMPLES, None, "Sat 2025");
    let workspace = dir.path().join("parts");

    let engine = ClosureEngine(|_: &Invocation| {
        Err(EngineError::ScriptFailed {
            package: "XCMS".to_string(),
            code: Some(2),
        })
    });

    assert!(partition(&experiment, None, &workspace, &engine).is_err());
    assert_eq!(fs::read_dir(&workspace).unwrap().count(), 0);
}
