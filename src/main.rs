//! # xcms-experiment
//!
//! Command-line tool for serialized XCMS experiment directories.
//!
//! ## Usage
//!
//! ```bash
//! # Merge experiments processed per sample
//! xcms-experiment collate ko15_peaks ko16_peaks -o collated
//!
//! # Split an experiment into two partitions
//! xcms-experiment partition collated -o parts -n 2
//!
//! # Detect peaks with a tuned configuration
//! xcms-experiment run find-peaks-centwave --spectra raw --experiment exp -o peaks --config xcms.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
