//! # Partitioning
//!
//! Splits one experiment into several along the sample axis so each part can
//! be processed on its own. The split itself is planned here
//! ([`PartitionPlan`]); extracting the rows and writing the partitions is done
//! by the engine script `partition_xcms_experiment`, which loads the experiment
//! against empty placeholder spectra files because the raw spectra are usually
//! not at hand.

mod error;
mod plan;

#[cfg(test)]
mod tests;

pub use error::PartitionError;
pub use plan::{PartitionKey, PartitionPlan};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use tempfile::TempDir;

use crate::engine::{Engine, Invocation};
use crate::experiment::ExperimentDir;
use crate::paths::create_placeholder_spectra;

/// Engine script writing the partitions
pub const PARTITION_SCRIPT: &str = "partition_xcms_experiment";

/// Split `experiment` into `num_partitions` experiments inside `workspace`.
///
/// `None` creates one partition per sample. Partition directories get fresh
/// names inside `workspace`. If the engine fails, every partition directory
/// created by this call is removed again.
pub fn partition<E: Engine + ?Sized>(
    experiment: &ExperimentDir,
    num_partitions: Option<usize>,
    workspace: impl AsRef<Path>,
    engine: &E,
) -> Result<BTreeMap<PartitionKey, ExperimentDir>, PartitionError> {
    let plan = PartitionPlan::new(experiment.sample_names()?, num_partitions)?;
    if let Some(message) = plan.warning() {
        warn!("{}", message);
    }
    info!(
        "Partitioning {} samples of {} into {} partitions",
        plan.sample_names().len(),
        experiment,
        plan.len()
    );

    let workspace = workspace.as_ref();
    fs::create_dir_all(workspace)?;
    let mut outputs = Vec::with_capacity(plan.len());
    for _ in 0..plan.len() {
        match ExperimentDir::create_in(workspace) {
            Ok(output) => outputs.push(output),
            Err(e) => {
                discard(outputs);
                return Err(e.into());
            }
        }
    }

    if let Err(e) = populate(experiment, &plan, &outputs, engine) {
        discard(outputs);
        return Err(e);
    }

    Ok(plan.keys().into_iter().zip(outputs).collect())
}

/// Run the engine script writing every partition.
fn populate<E: Engine + ?Sized>(
    experiment: &ExperimentDir,
    plan: &PartitionPlan,
    outputs: &[ExperimentDir],
    engine: &E,
) -> Result<(), PartitionError> {
    let scratch = TempDir::new()?;
    create_placeholder_spectra(experiment, scratch.path())?;

    let output_paths: Vec<String> = outputs
        .iter()
        .map(|o| o.path().to_string_lossy().into_owned())
        .collect();
    let invocation = Invocation::new(PARTITION_SCRIPT, "XCMS")
        .param("xcms_experiment", experiment.path())
        .param("output_paths", serde_json::to_string(&output_paths)?)
        .param("partition_indices", serde_json::to_string(plan.groups())?)
        .param("fake_spectra", scratch.path());

    engine.run(&invocation)?;
    Ok(())
}

fn discard(outputs: Vec<ExperimentDir>) {
    for output in outputs {
        let path = output.path().to_path_buf();
        if let Err(e) = output.remove() {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}
