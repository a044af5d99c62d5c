//! Runs one evaluation pass and turns every failure into an UNKNOWN verdict.

use crate::{
    errors::Result,
    evaluator,
    model::{BudgetRecord, Verdict},
    provider::BudgetProvider,
    reporter,
};

/// Which budgets a run evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Named(String),
    All,
}

impl Selection {
    /// An empty name selects every budget.
    pub fn from_name(name: Option<String>) -> Self {
        match name.filter(|name| !name.is_empty()) {
            Some(name) => Selection::Named(name),
            None => Selection::All,
        }
    }
}

/// Fetches, classifies and aggregates. Never fails: errors become UNKNOWN.
pub fn run(provider: &dyn BudgetProvider, selection: &Selection) -> Verdict {
    match evaluate(provider, selection) {
        Ok(verdict) => verdict,
        Err(err) => {
            tracing::warn!(error = %err, "budget check could not complete");
            reporter::unknown(&err)
        }
    }
}

fn evaluate(provider: &dyn BudgetProvider, selection: &Selection) -> Result<Verdict> {
    let records = fetch(provider, selection)?;
    tracing::info!(count = records.len(), "evaluating budgets");
    let (results, metrics) = evaluator::evaluate(&records)?;
    let verdict = reporter::aggregate(&results, metrics);
    tracing::info!(severity = %verdict.severity, "budget check finished");
    Ok(verdict)
}

fn fetch(provider: &dyn BudgetProvider, selection: &Selection) -> Result<Vec<BudgetRecord>> {
    match selection {
        Selection::Named(name) => {
            tracing::debug!(budget = %name, "fetching named budget");
            Ok(vec![provider.fetch_one(name)?])
        }
        Selection::All => {
            tracing::debug!("fetching all budgets");
            provider.fetch_all()
        }
    }
}
