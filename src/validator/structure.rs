use std::path::Path;

use anyhow::Result;

use crate::experiment::{ExperimentDir, ExperimentFile};

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 1: the directory exists and holds every required file.
///
/// Returns the opened experiment; a missing directory aborts validation.
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<ExperimentDir> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError(format!(
            "{} does not exist",
            path.display()
        )));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    if !path.is_dir() {
        report.add_check(ValidationCheck::failed(
            "Path is a directory",
            "An experiment is stored as a directory of tables",
        ));
        anyhow::bail!(ValidationError::StructureError(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    report.add_check(ValidationCheck::ok("Path is a directory"));

    let experiment = ExperimentDir::open(path)?;

    for file in ExperimentFile::ALL.into_iter().filter(|f| f.is_required()) {
        let name = format!("{} exists", file);
        if experiment.has(file) {
            report.add_check(ValidationCheck::ok(name));
        } else {
            report.add_check(ValidationCheck::failed(
                name,
                format!("Missing required file {}", file),
            ));
        }
    }

    check_optional_pairs(&experiment, report);

    Ok(experiment)
}

/// Peak and feature files only make sense in pairs.
fn check_optional_pairs(experiment: &ExperimentDir, report: &mut ValidationReport) {
    let pairs = [
        (ExperimentFile::ChromPeaks, ExperimentFile::ChromPeakData),
        (ExperimentFile::FeatureDefinitions, ExperimentFile::FeaturePeakIndex),
    ];
    for (a, b) in pairs {
        match (experiment.has(a), experiment.has(b)) {
            (true, true) => report.add_check(ValidationCheck::ok(format!("{} and {} present", a, b))),
            (false, false) => {}
            (true, false) | (false, true) => report.add_check(ValidationCheck::warning(
                format!("{} and {} present", a, b),
                "Only one file of the pair exists",
            )),
        }
    }

    if experiment.has(ExperimentFile::FeatureDefinitions) && !experiment.has(ExperimentFile::ChromPeaks) {
        report.add_check(ValidationCheck::warning(
            "Features have peaks",
            "Feature definitions exist without chromatographic peaks",
        ));
    }
}
