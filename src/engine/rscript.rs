use std::path::PathBuf;
use std::process::Command;

use log::{debug, info};
use serde::Deserialize;

use super::{Engine, EngineError, Invocation};

/// Notice shown before an external command runs
pub const EXTERNAL_CMD_WARNING: &str = "Running external command line application(s). \
This may print messages to stdout and/or stderr.\n\
The command(s) being run are below. These commands cannot be manually re-run \
as they will depend on temporary files that no longer exist.";

/// Settings of the `[engine]` configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the `*.R` scripts; `PATH` is searched when unset
    pub script_dir: Option<PathBuf>,
    /// Print the external-command notice and the command line (on by default)
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            script_dir: None,
            verbose: true,
        }
    }
}

/// Runs engine scripts as child processes.
///
/// The child inherits stdout and stderr, and is awaited without a timeout.
#[derive(Debug, Clone, Default)]
pub struct RScriptEngine {
    config: EngineConfig,
}

impl RScriptEngine {
    /// Create an engine from its configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Path or name of the executable for `invocation`
    pub fn program(&self, invocation: &Invocation) -> PathBuf {
        match &self.config.script_dir {
            Some(dir) => dir.join(invocation.script_file()),
            None => PathBuf::from(invocation.script_file()),
        }
    }
}

impl Engine for RScriptEngine {
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError> {
        let program = self.program(invocation);
        if self.config.verbose {
            eprintln!("{}", EXTERNAL_CMD_WARNING);
            eprintln!("\nCommand: {}\n", invocation);
        }
        info!("Running {} ({})", invocation.script(), invocation.package());
        debug!("Command: {} {}", program.display(), invocation.args().join(" "));

        let status = Command::new(&program)
            .args(invocation.args())
            .status()
            .map_err(|source| EngineError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EngineError::ScriptFailed {
                package: invocation.package().to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}
