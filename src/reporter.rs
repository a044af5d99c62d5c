//! Folds classification results into a single plugin verdict.

use crate::{
    errors::ProbeError,
    model::{ClassificationResult, Severity, Verdict},
};

pub const OVERSPENT_PREFIX: &str = "Budget forecast exceeds limit: ";
pub const WITHIN_LIMIT_PREFIX: &str = "Budgets forecast within limit: ";

/// Any overspent budget makes the run CRITICAL; otherwise it is OK.
///
/// The summary lists only the group that decided the severity, while the
/// perfdata keeps a token for every budget.
pub fn aggregate(results: &[ClassificationResult], metrics: Vec<String>) -> Verdict {
    let (overspent, within_limit): (Vec<&ClassificationResult>, Vec<&ClassificationResult>) =
        results.iter().partition(|result| result.overspent);

    let (severity, prefix, listed) = if overspent.is_empty() {
        (Severity::Ok, WITHIN_LIMIT_PREFIX, within_limit)
    } else {
        (Severity::Critical, OVERSPENT_PREFIX, overspent)
    };

    let descriptors: Vec<String> = listed.iter().map(|result| result.descriptor()).collect();

    Verdict {
        severity,
        summary_text: format!("{prefix}{}", descriptors.join(", ")),
        perf_data: metrics,
    }
}

/// Verdict for a run that could not evaluate its budgets.
pub fn unknown(error: &ProbeError) -> Verdict {
    Verdict {
        severity: Severity::Unknown,
        summary_text: format!("{} - {error}", Severity::Unknown),
        perf_data: Vec::new(),
    }
}
