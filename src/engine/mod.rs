//! # External Engine
//!
//! Peak detection, alignment, grouping and spectral matching are done by R
//! scripts around the XCMS and MetaboAnnotation packages. This module builds
//! their command lines and runs them:
//!
//! - [`Invocation`]: a script name plus ordered `--key value` parameters
//! - [`Engine`]: anything that can execute an invocation; [`RScriptEngine`]
//!   spawns the script as a child process
//! - [`actions`]: the parameter sets of the individual scripts and
//!   [`run_action`](actions::run_action)
//!
//! ```rust,no_run
//! use xcms_experiment::engine::actions::{run_action, ActionInputs, FindPeaksCentWave};
//! use xcms_experiment::engine::{EngineConfig, RScriptEngine};
//! use xcms_experiment::experiment::ExperimentDir;
//!
//! let engine = RScriptEngine::new(EngineConfig::default());
//! let inputs = ActionInputs {
//!     spectra: Some("spectra".into()),
//!     experiment: Some(ExperimentDir::open("raw_experiment")?),
//!     ..Default::default()
//! };
//! let action = FindPeaksCentWave { ppm: 15.0, ..Default::default() };
//! let output = run_action(&engine, &action, &inputs, "peaks")?;
//! # Ok::<(), xcms_experiment::engine::EngineError>(())
//! ```

pub mod actions;
mod error;
mod invocation;
mod rscript;


pub use error::EngineError;
pub use invocation::{Invocation, ParamValue};
pub use rscript::{EngineConfig, RScriptEngine, EXTERNAL_CMD_WARNING};

/// Executes engine script invocations
pub trait Engine {
    /// Run `invocation` to completion.
    ///
    /// Returns an error if the script cannot be started or exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn run(&self, invocation: &Invocation) -> Result<(), EngineError> {
        (**self).run(invocation)
    }
}
