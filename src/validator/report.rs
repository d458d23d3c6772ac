use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Outcome of one validation check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    Ok,
    /// Passed, with a remark
    Warning(String),
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

    /// `(label, message)` for non-ok outcomes
    fn detail(&self) -> Option<(&'static str, &str)> {
        match self {
            CheckStatus::Ok => None,
            CheckStatus::Warning(message) => Some(("WARNING", message)),
            CheckStatus::Failed(message) => Some(("FAILED", message)),
        }
    }
}

/// A named check and its outcome
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    pub name: String,
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

    /// Ok if `passed`, otherwise failed with `message`
    pub(crate) fn require(name: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        if passed {
            Self::ok(name)
        } else {
            Self::failed(name, message)
        }
    }
}

/// All checks run against one IPASC file
#[derive(Debug)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
    /// Path of the validated file
    pub file_path: String,
}

impl ValidationReport {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
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

    /// Format the report with terminal colors when the `colorized_output`
    /// feature is enabled, plain text otherwise
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("IPASC Validation Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=======================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("File").bold(), self.file_path));

            for check in &self.checks {
                let line = match &check.status {
                    CheckStatus::Ok => format!("[{}] {}", OK, style(&check.name).green()),
                    CheckStatus::Warning(msg) => format!(
                        "[{}] {} - {}: {}",
                        WARN,
                        style(&check.name).yellow(),
                        style("WARNING").yellow().bold(),
                        msg
                    ),
                    CheckStatus::Failed(msg) => format!(
                        "[{}] {} - {}: {}",
                        FAIL,
                        style(&check.name).red(),
                        style("FAILED").red().bold(),
                        msg
                    ),
                };
                output.push_str(&line);
                output.push('\n');
            }

            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n\n",
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
            output.push_str(&format!("{verdict}\n"));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IPASC Validation Report")?;
        writeln!(f, "=======================")?;
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(f)?;

        for check in &self.checks {
            write!(f, "[{}] {}", check.status.symbol(), check.name)?;
            match check.status.detail() {
                Some((label, message)) => writeln!(f, " - {label}: {message}")?,
                None => writeln!(f)?,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("record.ipasc");
        report.add_check(ValidationCheck::ok("mimetype is first entry"));
        report.add_check(ValidationCheck::warning("manifest.json", "missing"));
        report.add_check(ValidationCheck::failed("binary_time_series_data", "not an array"));

        let output = report.to_string();
        assert!(output.contains("[✓] mimetype is first entry"));
        assert!(output.contains("[⚠] manifest.json - WARNING: missing"));
        assert!(output.contains("[✗] binary_time_series_data - FAILED: not an array"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.ends_with("Validation FAILED\n"));
    }

    #[test]
    fn test_require() {
        assert!(ValidationCheck::require("a", true, "x").status.is_ok());
        assert_eq!(
            ValidationCheck::require("a", false, "x").status,
            CheckStatus::Failed("x".to_string())
        );
    }

    #[test]
    fn test_verdicts() {
        let mut report = ValidationReport::new("record.ipasc");
        report.add_check(ValidationCheck::ok("a"));
        assert_eq!(report.verdict(), "Validation PASSED");
        report.add_check(ValidationCheck::warning("b", "w"));
        assert_eq!(report.verdict(), "Validation PASSED with warnings");
        assert!(report.check("b").is_some());
    }
}
