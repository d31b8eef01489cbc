use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Validate an experiment directory
pub fn run(experiment: PathBuf) -> Result<()> {
    use xcms_experiment::validator::validate_experiment;

    info!("Validating {}", experiment.display());

    match validate_experiment(&experiment) {
        Ok(report) => {
            println!("{}", report.format_colored());

            // Exit with error code if validation failed
            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
