//! Verification of the experiment-wide files shared by all collation inputs.

use std::collections::BTreeSet;
use std::fs;

use log::debug;
use serde_json::Value;

use crate::experiment::{ExperimentDir, ExperimentFile};

use super::CollateError;

/// Experiment-wide files, in verification order
pub const GLOBAL_FILES: [ExperimentFile; 4] = [
    ExperimentFile::SpectraSlots,
    ExperimentFile::ProcessHistory,
    ExperimentFile::LinkMcols,
    ExperimentFile::ProcessingQueue,
];

/// Attribute keys of JSON step records that are ignored when comparing
/// experiment-wide JSON files.
///
/// Processing steps record when they ran; two experiments processed with
/// identical parameters on different days differ only in these keys. The set
/// is an explicit allow-list: anything not listed here counts as a real
/// processing difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    ignored_attributes: BTreeSet<String>,
}

impl Default for Normalization {
    fn default() -> Self {
        Self::new(["date"])
    }
}

impl Normalization {
    /// Ignore the given attribute keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored_attributes: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Compare JSON files exactly.
    pub fn strict() -> Self {
        Self {
            ignored_attributes: BTreeSet::new(),
        }
    }

    /// Ignored attribute keys
    pub fn ignored_attributes(&self) -> impl Iterator<Item = &str> {
        self.ignored_attributes.iter().map(String::as_str)
    }

    /// Canonical text of a file for comparison.
    ///
    /// The process history is decoded (including JSON documents embedded as
    /// strings), stripped of ignored attributes and re-encoded. Every other
    /// file is compared as it is.
    pub fn canonical(
        &self,
        file: ExperimentFile,
        content: String,
    ) -> Result<String, serde_json::Error> {
        if file != ExperimentFile::ProcessHistory || self.ignored_attributes.is_empty() {
            return Ok(content);
        }
        let mut value: Value = serde_json::from_str(&content)?;
        self.strip(&mut value);
        serde_json::to_string_pretty(&value)
    }

    fn strip(&self, value: &mut Value) {
        if let Some(mut inner) = embedded_json(value) {
            self.strip(&mut inner);
            *value = inner;
            return;
        }
        match value {
            Value::Array(items) => items.iter_mut().for_each(|item| self.strip(item)),
            Value::Object(map) => {
                if let Some(Value::Object(attributes)) = map.get_mut("attributes") {
                    for key in &self.ignored_attributes {
                        attributes.remove(key);
                    }
                }
                map.values_mut().for_each(|item| self.strip(item));
            }
            _ => {}
        }
    }
}

/// Decode a string value holding a JSON object or array.
fn embedded_json(value: &Value) -> Option<Value> {
    let text = value.as_str()?;
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str(text).ok()
    } else {
        None
    }
}

/// Check that every global file is identical across `inputs`.
///
/// Returns the files the collated experiment must carry; optional files absent
/// from every input are left out.
pub(crate) fn verify(
    inputs: &[ExperimentDir],
    normalization: &Normalization,
) -> Result<Vec<ExperimentFile>, CollateError> {
    let Some((reference, rest)) = inputs.split_first() else {
        return Err(CollateError::NoInputs);
    };
    let mut carried = Vec::with_capacity(GLOBAL_FILES.len());

    for file in GLOBAL_FILES {
        if !file.is_required() && !check_presence(file, inputs)? {
            debug!("{} absent from all inputs", file);
            continue;
        }

        let expected = read_canonical(reference, file, normalization)?;
        for input in rest {
            let found = read_canonical(input, file, normalization)?;
            if found != expected {
                return Err(CollateError::GlobalFileMismatch {
                    file: file.file_name(),
                    path: input.file(file),
                    snippet: first_difference(&expected, &found),
                });
            }
        }
        debug!("{} identical across {} inputs", file, inputs.len());
        carried.push(file);
    }

    Ok(carried)
}

/// Whether an optional file is present, requiring all-or-none.
fn check_presence(file: ExperimentFile, inputs: &[ExperimentDir]) -> Result<bool, CollateError> {
    let present = inputs.iter().find(|input| input.has(file));
    let missing = inputs.iter().find(|input| !input.has(file));
    match (present, missing) {
        (Some(present), Some(missing)) => Err(CollateError::OptionalFilePresence {
            file: file.file_name(),
            present: present.path().to_path_buf(),
            missing: missing.path().to_path_buf(),
        }),
        (Some(_), None) => Ok(true),
        _ => Ok(false),
    }
}

fn read_canonical(
    experiment: &ExperimentDir,
    file: ExperimentFile,
    normalization: &Normalization,
) -> Result<String, CollateError> {
    let path = experiment.file(file);
    if !path.is_file() {
        return Err(crate::experiment::ExperimentError::MissingFile {
            file: file.file_name(),
            dir: experiment.path().to_path_buf(),
        }
        .into());
    }
    let content = fs::read_to_string(&path)?;
    normalization
        .canonical(file, content)
        .map_err(|source| CollateError::Json { path, source })
}

/// Describe the first line at which two texts differ.
fn first_difference(expected: &str, found: &str) -> String {
    let mut expected_lines = expected.lines();
    let mut found_lines = found.lines();
    let mut line = 1;
    loop {
        match (expected_lines.next(), found_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (None, None) => return "Files differ in line endings only".to_string(),
            (a, b) => {
                return format!(
                    "First difference at line {}:\n- {}\n+ {}",
                    line,
                    a.unwrap_or("<end of file>"),
                    b.unwrap_or("<end of file>")
                )
            }
        }
    }
}
