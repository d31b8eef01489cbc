use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;

use xcms_experiment::experiment::ExperimentDir;
use xcms_experiment::metadata::spectral_metadata;

/// Export per-spectrum metadata
pub fn run(path: PathBuf, output: Option<PathBuf>, ms_level: Option<u8>) -> Result<()> {
    let experiment = ExperimentDir::open(&path)
        .with_context(|| format!("Failed to open experiment {}", path.display()))?;
    let metadata = spectral_metadata(&experiment, ms_level).context("Failed to export metadata")?;

    match output {
        Some(output) => {
            metadata
                .write_path(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!("Wrote {} metadata rows to {}", metadata.len(), output.display());
        }
        None => metadata.write_tsv(io::stdout().lock())?,
    }
    Ok(())
}
