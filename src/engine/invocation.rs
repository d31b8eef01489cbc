use std::fmt;
use std::path::{Path, PathBuf};

/// A parameter value as passed on the script command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue(String);

impl ParamValue {
    /// The command-line text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self(if value { "True" } else { "False" }.to_string())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Path> for ParamValue {
    fn from(value: &Path) -> Self {
        Self(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ParamValue {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

macro_rules! param_from_display {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                Self(value.to_string())
            }
        })*
    };
}

param_from_display!(i32, i64, u32, u64, usize, f64);

/// One call of an engine script: `<script>.R --key value ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    script: String,
    package: String,
    params: Vec<(String, String)>,
}

impl Invocation {
    /// Start an invocation of `script`, which drives `package`.
    pub fn new(script: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            package: package.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.into(), value.into().0));
        self
    }

    /// Add a parameter if it has a value; `None` is left off the command line.
    pub fn opt_param<V: Into<ParamValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Script name without extension
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Package named in failure messages
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Parameters in the order they were added
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the parameter `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Executable file name
    pub fn script_file(&self) -> String {
        format!("{}.R", self.script)
    }

    /// Command-line arguments
    pub fn args(&self) -> Vec<String> {
        self.params
            .iter()
            .flat_map(|(key, value)| [format!("--{}", key), value.clone()])
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.script_file())?;
        for arg in self.args() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
