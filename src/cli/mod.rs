use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod collate;
mod config;
mod database;
mod info;
mod metadata;
mod partition;
mod paths;
mod run;
mod validate;

pub use config::Config;

/// xcms-experiment - collate, partition and process XCMS experiment directories
#[derive(Parser)]
#[command(name = "xcms-experiment")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Engine scripts the `run` command can invoke.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ActionArg {
    /// Import raw spectra into a new experiment
    ReadMsExperiment,
    /// Peak detection with centWave
    FindPeaksCentwave,
    /// Retention time alignment with Obiwarp
    AdjustRetentionTimeObiwarp,
    /// Peak grouping by density
    GroupPeaksDensity,
    /// Gap filling by integrating the peak area
    FillPeaksArea,
    /// Match spectra against a reference library
    MatchSpectra,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge several experiments into one
    Collate {
        /// Experiment directories, in sample order
        #[arg(value_name = "EXPERIMENT", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output directory (must not exist or be empty)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Step attribute ignored when comparing process histories (repeatable)
        #[arg(long = "ignore-attribute", value_name = "KEY")]
        ignore_attributes: Vec<String>,

        /// Compare process histories byte for byte
        #[arg(long, conflicts_with = "ignore_attributes")]
        strict: bool,
    },

    /// Split an experiment along its samples
    Partition {
        /// Experiment directory
        #[arg(value_name = "EXPERIMENT")]
        experiment: PathBuf,

        /// Directory receiving the partitions
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Number of partitions (defaults to one per sample)
        #[arg(short = 'n', long)]
        num_partitions: Option<usize>,

        /// Load engine settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Point the raw spectra paths of an experiment at a new directory
    RewritePaths {
        /// Experiment directory
        #[arg(value_name = "EXPERIMENT")]
        experiment: PathBuf,

        /// Directory the raw spectra files live in now
        #[arg(value_name = "DIR")]
        new_base: PathBuf,
    },

    /// Create empty stand-ins for the raw spectra of an experiment
    Placeholders {
        /// Experiment directory
        #[arg(value_name = "EXPERIMENT")]
        experiment: PathBuf,

        /// Directory receiving the placeholder files
        #[arg(value_name = "DIR")]
        target: PathBuf,
    },

    /// Validate the structure of an experiment directory
    Validate {
        /// Experiment directory
        #[arg(value_name = "EXPERIMENT")]
        experiment: PathBuf,
    },

    /// Display information about an experiment
    Info {
        /// Experiment directory
        #[arg(value_name = "EXPERIMENT")]
        experiment: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the MassBank reference library
    FetchMassbank {
        /// Output directory, created if missing
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Download from this URL instead of the latest MassBank release
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },

    /// Export one row of metadata per spectrum and sample as TSV
    SpectralMetadata {
        /// Experiment directory
        #[arg(value_name = "EXPERIMENT")]
        experiment: PathBuf,

        /// Output TSV file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only export spectra of this MS level
        #[arg(long)]
        ms_level: Option<u8>,
    },

    /// Run an engine script
    Run {
        /// Script to run
        #[arg(value_enum)]
        action: ActionArg,

        /// Output directory (must not exist or be empty)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Directory of raw spectra files
        #[arg(long, value_name = "DIR")]
        spectra: Option<PathBuf>,

        /// Experiment produced by a previous step
        #[arg(long, value_name = "DIR")]
        experiment: Option<PathBuf>,

        /// Reference spectra library (match-spectra)
        #[arg(long, value_name = "FILE")]
        target_spectra: Option<PathBuf>,

        /// Sample metadata TSV (read-ms-experiment)
        #[arg(long, value_name = "FILE")]
        sample_metadata: Option<PathBuf>,

        /// Load engine and action settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory holding the engine scripts
        #[arg(long, value_name = "DIR")]
        script_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Collate {
            inputs,
            output,
            ignore_attributes,
            strict,
        } => collate::run(inputs, output, ignore_attributes, strict),
        Commands::Partition {
            experiment,
            output,
            num_partitions,
            config,
        } => partition::run(experiment, output, num_partitions, config, verbose),
        Commands::RewritePaths {
            experiment,
            new_base,
        } => paths::rewrite(experiment, new_base),
        Commands::Placeholders { experiment, target } => paths::placeholders(experiment, target),
        Commands::Validate { experiment } => validate::run(experiment),
        Commands::Info { experiment, json } => info::run(experiment, json),
        Commands::FetchMassbank { output, url } => database::fetch(output, url),
        Commands::SpectralMetadata {
            experiment,
            output,
            ms_level,
        } => metadata::run(experiment, output, ms_level),
        Commands::Run {
            action,
            output,
            spectra,
            experiment,
            target_spectra,
            sample_metadata,
            config,
            script_dir,
        } => run::run(
            action,
            output,
            run::RunInputs {
                spectra,
                experiment,
                target_spectra,
                sample_metadata,
            },
            config,
            script_dir,
            verbose,
        ),
    }
}
