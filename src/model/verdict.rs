use std::fmt;

/// Which amount drove an overspend decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonBasis {
    Forecast,
    Actual,
}

impl ComparisonBasis {
    pub fn abbreviation(self) -> &'static str {
        match self {
            ComparisonBasis::Forecast => "fcst",
            ComparisonBasis::Actual => "act",
        }
    }
}

/// Outcome of comparing one budget against its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub budget_name: String,
    pub overspent: bool,
    pub basis: ComparisonBasis,
    pub comparison_amount: f64,
    pub limit: f64,
}

impl ClassificationResult {
    /// Summary fragment such as `infra(fcst:120.00;limit:100.00)`.
    pub fn descriptor(&self) -> String {
        format!(
            "{}({}:{:.2};limit:{:.2})",
            self.budget_name,
            self.basis.abbreviation(),
            self.comparison_amount,
            self.limit
        )
    }
}

/// Plugin states understood by Icinga/Nagios supervisors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    /// Part of the plugin interface; budget comparison never yields it.
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final result of a run: severity, human summary, and perfdata tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub severity: Severity,
    pub summary_text: String,
    pub perf_data: Vec<String>,
}

impl Verdict {
    /// Renders the single plugin output line: text, a literal `|`, then metrics.
    pub fn render(&self) -> String {
        if self.severity == Severity::Unknown {
            return self.summary_text.trim_end().to_string();
        }
        let line = format!(
            "{} | {}",
            self.summary_text.trim_end(),
            self.perf_data.join(" ")
        );
        line.trim_end().to_string()
    }

    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
