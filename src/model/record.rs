use std::fmt;

use crate::errors::{ProbeError, Result};

/// A decimal amount paired with its currency or unit code.
///
/// The provider reports amounts as decimal strings. The parsed value drives
/// comparisons while the original text is echoed into performance data.
#[derive(Debug, Clone, PartialEq)]
pub struct Money {
    pub amount: f64,
    pub unit: String,
    text: String,
}

impl Money {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
            text: amount.to_string(),
        }
    }

    /// Parses a provider-supplied decimal string, keeping its textual form.
    pub fn parse(text: &str, unit: impl Into<String>) -> Result<Self> {
        let trimmed = text.trim();
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| ProbeError::MalformedRecord(format!("`{trimmed}` is not a decimal amount")))?;
        if !amount.is_finite() {
            return Err(ProbeError::MalformedRecord(format!(
                "`{trimmed}` is not a finite amount"
            )));
        }
        Ok(Self {
            amount,
            unit: unit.into(),
            text: trimmed.to_string(),
        })
    }

    /// The amount as the provider wrote it.
    pub fn as_text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.unit)
    }
}

/// One budget definition together with its live spend figures.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRecord {
    pub name: String,
    pub limit: Money,
    pub forecasted_spend: Option<Money>,
    /// Always supplied by a well-behaved provider. Kept optional so the
    /// evaluator can reject records that break that contract.
    pub actual_spend: Option<Money>,
}

impl BudgetRecord {
    pub fn new(name: impl Into<String>, limit: Money, actual_spend: Money) -> Self {
        Self {
            name: name.into(),
            limit,
            forecasted_spend: None,
            actual_spend: Some(actual_spend),
        }
    }

    pub fn with_forecast(mut self, forecast: Money) -> Self {
        self.forecasted_spend = Some(forecast);
        self
    }

    pub fn limit_unit(&self) -> &str {
        &self.limit.unit
    }

    pub fn actual_spend(&self) -> Result<&Money> {
        self.actual_spend.as_ref().ok_or_else(|| {
            ProbeError::MalformedRecord(format!("budget `{}` has no actual spend", self.name))
        })
    }
}
