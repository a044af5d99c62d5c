//! Pure classification and perfdata rendering for budget records.

use crate::{
    errors::Result,
    model::{BudgetRecord, ClassificationResult, ComparisonBasis},
};

/// Compares a budget against its limit, preferring the forecast when present.
///
/// Equality with the limit is not an overspend.
pub fn classify(record: &BudgetRecord) -> Result<ClassificationResult> {
    let (basis, amount) = match &record.forecasted_spend {
        Some(forecast) => (ComparisonBasis::Forecast, forecast.amount),
        None => (ComparisonBasis::Actual, record.actual_spend()?.amount),
    };
    let limit = record.limit.amount;

    Ok(ClassificationResult {
        budget_name: record.name.clone(),
        overspent: amount > limit,
        basis,
        comparison_amount: amount,
        limit,
    })
}

/// Renders `'label'=value[unit];warn;crit` using actual spend as the value and
/// the limit as both thresholds.
pub fn render_metric(record: &BudgetRecord) -> Result<String> {
    let actual = record.actual_spend()?;
    let limit = record.limit.as_text();
    Ok(format!(
        "{}={}{};{};{}",
        quote_label(&record.name),
        actual.as_text(),
        actual.unit,
        limit,
        limit
    ))
}

/// Classifies and renders every record in input order.
///
/// The first malformed record fails the whole batch.
pub fn evaluate(records: &[BudgetRecord]) -> Result<(Vec<ClassificationResult>, Vec<String>)> {
    let mut results = Vec::with_capacity(records.len());
    let mut metrics = Vec::with_capacity(records.len());
    for record in records {
        let result = classify(record)?;
        tracing::debug!(
            budget = %record.name,
            basis = result.basis.abbreviation(),
            amount = result.comparison_amount,
            limit = result.limit,
            overspent = result.overspent,
            "classified budget"
        );
        results.push(result);
        metrics.push(render_metric(record)?);
    }
    Ok((results, metrics))
}

// Single quotes inside a label are escaped by doubling them.
fn quote_label(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}
