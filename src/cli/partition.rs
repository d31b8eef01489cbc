use anyhow::{Context, Result};
use std::path::PathBuf;

use xcms_experiment::engine::RScriptEngine;
use xcms_experiment::experiment::ExperimentDir;
use xcms_experiment::partition::partition;

use super::Config;

/// Partition an experiment into `output`
pub fn run(
    experiment: PathBuf,
    output: PathBuf,
    num_partitions: Option<usize>,
    config: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let config = Config::load(config.as_deref())?;
    let engine = RScriptEngine::new(config.engine(None, verbose));

    let experiment = ExperimentDir::open(&experiment)
        .with_context(|| format!("Failed to open experiment {}", experiment.display()))?;
    let partitions = partition(&experiment, num_partitions, &output, &engine)
        .context("Partitioning failed")?;

    println!("Partitions of {}:", experiment);
    for (key, part) in &partitions {
        println!("  {}: {}", key, part);
    }
    Ok(())
}
