use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

const TITLE: &str = "XCMS Experiment Validation Report";
const RULE: &str = "================================";

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// Individual validation check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCheck {
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }

    /// `Ok` when `result` succeeded, `Failed` with the error message otherwise
    pub(crate) fn from_result<E: fmt::Display>(name: impl Into<String>, result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::ok(name),
            Err(e) => Self::failed(name, e.to_string()),
        }
    }
}

/// Complete validation report for one experiment directory
#[derive(Debug)]
pub struct ValidationReport {
    /// List of individual validation check results
    pub checks: Vec<ValidationCheck>,
    /// Path of the experiment that was validated
    pub experiment_path: String,
}

impl ValidationReport {
    /// Create an empty report for the given experiment path
    pub fn new(experiment_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            experiment_path: experiment_path.into(),
        }
    }

    /// Add a validation check result to the report
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Check if any validation checks failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Check if any validation checks produced warnings
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    /// Count the number of successful checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    /// Count the number of failures
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Format the report with colors (requires the `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style(TITLE).bold().cyan()));
            output.push_str(&format!("{}\n", style(RULE).cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Experiment").bold(), self.experiment_path));

            for check in &self.checks {
                match &check.status {
                    CheckStatus::Ok => {
                        output.push_str(&format!("[{}] {}\n", OK, style(&check.name).green()));
                    }
                    CheckStatus::Warning(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            WARN,
                            style(&check.name).yellow(),
                            style("WARNING").yellow().bold(),
                            msg
                        ));
                    }
                    CheckStatus::Failed(msg) => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            FAIL,
                            style(&check.name).red(),
                            style("FAILED").red().bold(),
                            msg
                        ));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} passed, {} warnings, {} failed\n\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));

            let verdict = style(self.verdict()).bold();
            let verdict = if self.has_failures() {
                verdict.red()
            } else if self.has_warnings() {
                verdict.yellow()
            } else {
                verdict.green()
            };
            output.push_str(&format!("{}\n", verdict));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Experiment: {}", self.experiment_path)?;
        writeln!(f)?;

        for check in &self.checks {
            write!(f, "[{}] {}", check.status.symbol(), check.name)?;

            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.verdict())
    }
}
