use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use xcms_experiment::collate::{Collator, Normalization};
use xcms_experiment::experiment::ExperimentDir;

/// Collate experiments into `output`
pub fn run(
    inputs: Vec<PathBuf>,
    output: PathBuf,
    ignore_attributes: Vec<String>,
    strict: bool,
) -> Result<()> {
    let experiments = inputs
        .iter()
        .map(|path| {
            ExperimentDir::open(path)
                .with_context(|| format!("Failed to open experiment {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let normalization = if strict {
        Normalization::strict()
    } else if ignore_attributes.is_empty() {
        Normalization::default()
    } else {
        Normalization::new(ignore_attributes)
    };
    let ignored: Vec<&str> = normalization.ignored_attributes().collect();
    info!("Ignoring history attributes: {}", ignored.join(", "));

    let collated = Collator::new()
        .with_normalization(normalization)
        .collate(&experiments, &output)
        .context("Collation failed")?;

    println!("Collated {} experiments into {}", experiments.len(), collated);
    println!("{}", collated.summary()?);
    Ok(())
}
