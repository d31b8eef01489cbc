use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use xcms_experiment::engine::actions::{run_action, Action, ActionInputs};
use xcms_experiment::engine::RScriptEngine;
use xcms_experiment::experiment::ExperimentDir;

use super::{ActionArg, Config};

/// Inputs given on the command line
pub struct RunInputs {
    pub spectra: Option<PathBuf>,
    pub experiment: Option<PathBuf>,
    pub target_spectra: Option<PathBuf>,
    pub sample_metadata: Option<PathBuf>,
}

/// Run one engine script
pub fn run(
    action: ActionArg,
    output: PathBuf,
    inputs: RunInputs,
    config: Option<PathBuf>,
    script_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut config = Config::load(config.as_deref())?;
    let engine = RScriptEngine::new(config.engine(script_dir, verbose));

    let experiment = inputs
        .experiment
        .map(|path| {
            ExperimentDir::open(&path)
                .with_context(|| format!("Failed to open experiment {}", path.display()))
        })
        .transpose()?;
    let action_inputs = ActionInputs {
        spectra: inputs.spectra,
        experiment,
        target_spectra: inputs.target_spectra,
    };
    if inputs.sample_metadata.is_some() {
        config.read_ms_experiment.sample_metadata = inputs.sample_metadata;
    }

    let result = match action {
        ActionArg::ReadMsExperiment => execute(&engine, &config.read_ms_experiment, &action_inputs, &output),
        ActionArg::FindPeaksCentwave => execute(&engine, &config.find_peaks_centwave, &action_inputs, &output),
        ActionArg::AdjustRetentionTimeObiwarp => {
            execute(&engine, &config.adjust_retention_time_obiwarp, &action_inputs, &output)
        }
        ActionArg::GroupPeaksDensity => execute(&engine, &config.group_peaks_density, &action_inputs, &output),
        ActionArg::FillPeaksArea => execute(&engine, &config.fill_peaks_area, &action_inputs, &output),
        ActionArg::MatchSpectra => execute(&engine, &config.match_spectra, &action_inputs, &output),
    }?;

    println!("{}", result.display());
    Ok(())
}

fn execute<A: Action>(
    engine: &RScriptEngine,
    action: &A,
    inputs: &ActionInputs,
    output: &Path,
) -> Result<PathBuf> {
    run_action(engine, action, inputs, output).with_context(|| format!("{} failed", A::SCRIPT))
}
