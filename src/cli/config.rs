//! TOML configuration file for the engine and its actions.
//!
//! Every section is optional; missing parameters keep their defaults:
//!
//! ```toml
//! # xcms-experiment.toml
//! [engine]
//! script_dir = "/opt/xcms-scripts"
//! verbose = false
//!
//! [find_peaks_centwave]
//! ppm = 15.0
//! threads = 4
//!
//! [group_peaks_density]
//! bw = 10.0
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use xcms_experiment::engine::actions::{
    AdjustRetentionTimeObiwarp, FillPeaksArea, FindPeaksCentWave, GroupPeaksDensity, MatchSpectra,
    ReadMsExperiment,
};
use xcms_experiment::engine::EngineConfig;

/// Root configuration structure for xcms-experiment.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings.
    pub engine: EngineConfig,
    /// `read_ms_experiment` parameters.
    pub read_ms_experiment: ReadMsExperiment,
    /// `find_peaks_centwave` parameters.
    pub find_peaks_centwave: FindPeaksCentWave,
    /// `adjust_retention_time_obiwarp` parameters.
    pub adjust_retention_time_obiwarp: AdjustRetentionTimeObiwarp,
    /// `group_peaks_density` parameters.
    pub group_peaks_density: GroupPeaksDensity,
    /// `fill_peaks_area` parameters.
    pub fill_peaks_area: FillPeaksArea,
    /// `match_spectra` parameters.
    pub match_spectra: MatchSpectra,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line overrides to the engine section.
    pub fn engine(&self, script_dir: Option<PathBuf>, verbose: bool) -> EngineConfig {
        EngineConfig {
            script_dir: script_dir.or_else(|| self.engine.script_dir.clone()),
            verbose: verbose || self.engine.verbose,
        }
    }
}
