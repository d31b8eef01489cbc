use std::collections::HashSet;

use crate::experiment::ExperimentDir;
use crate::ids::{RowId, SampleIndex};
use crate::schema::SAMPLE;

use super::{ValidationCheck, ValidationReport};

/// Step 3: row references across tables point at existing rows.
pub(crate) fn check_integrity(experiment: &ExperimentDir, report: &mut ValidationReport) {
    let (Ok(backend), Ok(samples), Ok(links)) = (
        experiment.backend_data(),
        experiment.sample_data(),
        experiment.links(),
    ) else {
        report.add_check(ValidationCheck::warning(
            "Referential integrity",
            "Skipped because a required table could not be read",
        ));
        return;
    };

    let spectra = backend.len();
    let sample_count = samples.len();

    let dangling = links
        .iter()
        .find(|l| l.sample.position() > sample_count || l.spectrum.position() > spectra);
    report.add_check(match dangling {
        None => ValidationCheck::ok("Links reference existing rows"),
        Some(link) => ValidationCheck::failed(
            "Links reference existing rows",
            format!(
                "Link {} -> {} points past {} samples and {} spectra",
                link.sample, link.spectrum, sample_count, spectra
            ),
        ),
    });

    let linked: HashSet<usize> = links.iter().map(|l| l.spectrum.position()).collect();
    let unlinked = (1..=spectra).filter(|s| !linked.contains(s)).count();
    if unlinked == 0 {
        report.add_check(ValidationCheck::ok("Every spectrum is linked to a sample"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Every spectrum is linked to a sample",
            format!("{} of {} spectra have no sample", unlinked, spectra),
        ));
    }

    check_peaks(experiment, sample_count, report);
}

fn check_peaks(experiment: &ExperimentDir, sample_count: usize, report: &mut ValidationReport) {
    let Ok(Some(peaks)) = experiment.chrom_peaks() else {
        return;
    };

    let name = "Peaks reference existing samples";
    match peaks.column_values(SAMPLE) {
        None => report.add_check(ValidationCheck::failed(name, "Missing sample column")),
        Some(mut values) => {
            let invalid = values.find(|v| {
                v.parse::<SampleIndex>()
                    .map(|s| s.position() > sample_count)
                    .unwrap_or(true)
            });
            report.add_check(match invalid {
                None => ValidationCheck::ok(name),
                Some(value) => ValidationCheck::failed(
                    name,
                    format!("Sample '{}' is not one of {} samples", value, sample_count),
                ),
            });
        }
    }

    if let Ok(Some(peak_data)) = experiment.chrom_peak_data() {
        let name = "Peak data has one row per peak";
        if peak_data.len() == peaks.len() {
            report.add_check(ValidationCheck::ok(name));
        } else {
            report.add_check(ValidationCheck::failed(
                name,
                format!("{} peaks but {} peak data rows", peaks.len(), peak_data.len()),
            ));
        }
    }
}
