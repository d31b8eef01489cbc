use anyhow::{Context, Result};
use std::path::PathBuf;

use xcms_experiment::experiment::ExperimentDir;

/// Display information about an experiment directory
pub fn run(path: PathBuf, json: bool) -> Result<()> {
    let experiment = ExperimentDir::open(&path)
        .with_context(|| format!("Failed to open experiment {}", path.display()))?;
    let summary = experiment.summary().context("Failed to read experiment")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("XCMS Experiment Information");
    println!("===========================");
    println!("Path: {}", experiment);
    println!();
    println!("{}", summary);

    Ok(())
}
