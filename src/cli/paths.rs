use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use xcms_experiment::experiment::ExperimentDir;
use xcms_experiment::paths::{create_placeholder_spectra, rewrite_spectra_paths};

fn open(path: &Path) -> Result<ExperimentDir> {
    ExperimentDir::open(path).with_context(|| format!("Failed to open experiment {}", path.display()))
}

/// Rewrite the raw spectra paths of an experiment
pub fn rewrite(experiment: PathBuf, new_base: PathBuf) -> Result<()> {
    let experiment = open(&experiment)?;
    let cells = rewrite_spectra_paths(&experiment, &new_base)
        .with_context(|| format!("Failed to rewrite paths of {}", experiment))?;

    println!("Rewrote {} cells to point at {}", cells, new_base.display());
    Ok(())
}

/// Create placeholder spectra files
pub fn placeholders(experiment: PathBuf, target: PathBuf) -> Result<()> {
    let experiment = open(&experiment)?;
    let created = create_placeholder_spectra(&experiment, &target)
        .with_context(|| format!("Failed to create placeholders in {}", target.display()))?;

    for path in &created {
        println!("{}", path.display());
    }
    Ok(())
}
