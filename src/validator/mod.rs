//! # Experiment Validation Module
//!
//! Structural validation of serialized experiment directories before they are
//! collated, partitioned or handed to the engine.
//!
//! ## Validation Checklist
//!
//! 1. **Structure Check**: the path is a directory holding every required file
//! 2. **Format Check**: format tags, column headers and JSON records of each present file
//! 3. **Referential Integrity**: links and peak samples point at existing rows
//!
//! ## Usage
//!
//! ```rust,no_run
//! use xcms_experiment::validator::validate_experiment;
//! use std::path::Path;
//!
//! match validate_experiment(Path::new("experiment")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod format;
mod integrity;
mod report;
mod structure;


/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The experiment directory cannot be validated at all
    #[error("Structure error: {0}")]
    StructureError(String),
}

/// Main validation entry point
///
/// Only a missing or non-directory path is an error; every other problem is
/// recorded in the report.
pub fn validate_experiment(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure Check
    let experiment = structure::check_structure(path, &mut report)?;

    // 2. Format Check
    format::check_formats(&experiment, &mut report);

    // 3. Referential Integrity
    integrity::check_integrity(&experiment, &mut report);

    Ok(report)
}
