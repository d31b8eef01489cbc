use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::experiment::{ExperimentDir, ExperimentFile};
use crate::schema::*;
use crate::table::RowTable;

use super::{ValidationCheck, ValidationReport};

/// Step 2: every present file has the layout its format requires.
pub(crate) fn check_formats(experiment: &ExperimentDir, report: &mut ValidationReport) {
    for file in ExperimentFile::ALL {
        if !experiment.has(file) {
            continue;
        }
        let result = match file {
            ExperimentFile::BackendData => check_backend(experiment),
            ExperimentFile::SampleData => check_sample_data(experiment),
            ExperimentFile::SampleLinks => experiment.links().map(|_| ()).map_err(|e| e.to_string()),
            ExperimentFile::LinkMcols => check_link_mcols(&experiment.file(file)),
            ExperimentFile::ProcessingQueue | ExperimentFile::ProcessHistory => {
                check_json_records(&experiment.file(file))
            }
            ExperimentFile::SpectraSlots => check_spectra_slots(&experiment.file(file)),
            ExperimentFile::ChromPeaks => check_header(experiment, file, &CHROM_PEAK_COLUMNS, true),
            ExperimentFile::ChromPeakData => {
                check_header(experiment, file, &CHROM_PEAK_DATA_COLUMNS, true)
            }
            ExperimentFile::FeatureDefinitions => {
                check_header(experiment, file, &FEATURE_DEFINITION_COLUMNS, false)
            }
            ExperimentFile::FeaturePeakIndex => {
                check_header(experiment, file, &FEATURE_PEAK_INDEX_COLUMNS, true)
            }
        };
        report.add_check(ValidationCheck::from_result(format!("{} format", file), result));
    }
}

fn read_table(experiment: &ExperimentDir, file: ExperimentFile) -> Result<RowTable, String> {
    experiment.read_table(file).map_err(|e| e.to_string())
}

fn check_header(
    experiment: &ExperimentDir,
    file: ExperimentFile,
    expected: &[&str],
    exact: bool,
) -> Result<(), String> {
    let table = read_table(experiment, file)?;
    let result = if exact {
        validate_columns_exact(file.file_name(), expected, &table.columns)
    } else {
        validate_columns_superset(file.file_name(), expected, &table.columns)
    };
    result.map_err(|e| e.to_string())
}

fn check_backend(experiment: &ExperimentDir) -> Result<(), String> {
    let tag = first_line(&experiment.file(ExperimentFile::BackendData))?;
    if tag != MS_BACKEND_FORMAT_TAG {
        return Err(format!(
            "The first line must be '{}', found '{}'",
            MS_BACKEND_FORMAT_TAG, tag
        ));
    }
    check_header(
        experiment,
        ExperimentFile::BackendData,
        &BACKEND_REQUIRED_COLUMNS,
        false,
    )
}

fn check_sample_data(experiment: &ExperimentDir) -> Result<(), String> {
    let table = read_table(experiment, ExperimentFile::SampleData)?;
    let columns = table.column_names();
    if columns.len() != SAMPLE_DATA_COLUMN_COUNT || columns[2] != SPECTRA_ORIGIN {
        return Err(format!(
            "Header does not match {}. It must consist of three columns where the third column is called '{}':\n\nFound instead:\n{}",
            MS_EXPERIMENT_SAMPLE_DATA,
            SPECTRA_ORIGIN,
            columns.join(", ")
        ));
    }
    Ok(())
}

fn check_link_mcols(path: &Path) -> Result<(), String> {
    let line = first_line(path)?;
    if line.trim() != LINK_MCOLS_HEADER {
        return Err(format!(
            "Header does not match {}. It must consist of the following line:\n{}\n\nFound instead:\n{}",
            MS_EXPERIMENT_LINK_MCOLS, LINK_MCOLS_HEADER, line
        ));
    }
    Ok(())
}

/// Root array whose first element is a string-encoded step record.
pub(crate) fn check_json_records(path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let root: Value =
        serde_json::from_str(&content).map_err(|e| format!("File is not valid JSON: {}", e))?;
    let Value::Array(items) = root else {
        return Err("The root element must be a list.".to_string());
    };
    let Some(first) = items.first() else {
        return Err("The root list is empty.".to_string());
    };
    let Value::String(encoded) = first else {
        return Err("The list elements must be JSON-encoded strings.".to_string());
    };
    let record: Value = serde_json::from_str(encoded)
        .map_err(|e| format!("The first list element is not valid JSON: {}", e))?;

    let has_keys = record
        .as_object()
        .map(|object| JSON_RECORD_KEYS.iter().all(|k| object.contains_key(*k)))
        .unwrap_or(false);
    if !has_keys {
        return Err(format!(
            "JSON object must contain the keys: {}",
            JSON_RECORD_KEYS.join(", ")
        ));
    }
    Ok(())
}

/// `key = value` lines with exactly the expected keys.
pub(crate) fn check_spectra_slots(path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let found: BTreeSet<&str> = content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, _)| key.trim())
        .collect();
    let expected: BTreeSet<&str> = SPECTRA_SLOT_KEYS.into_iter().collect();

    if found != expected {
        return Err(format!(
            "File must have the following structure:\n{}",
            SPECTRA_SLOT_KEYS
                .iter()
                .map(|k| format!("{} = ...", k))
                .collect::<Vec<_>>()
                .join("\n")
        ));
    }
    Ok(())
}

fn first_line(path: &Path) -> Result<String, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| e.to_string())?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
