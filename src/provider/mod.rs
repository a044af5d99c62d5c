//! Contract between the probe and whatever supplies budget data.

pub mod json_backend;

use std::collections::HashSet;

use crate::{
    errors::{ProbeError, Result},
    model::BudgetRecord,
};

pub use json_backend::{BudgetSource, JsonProvider};

/// One page of budgets plus the token that continues the listing, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPage {
    pub records: Vec<BudgetRecord>,
    pub next_token: Option<String>,
}

/// Abstraction over budget data sources.
///
/// Implementations resolve account identity and credentials themselves; every
/// retrieval failure is reported as [`ProbeError::Provider`].
pub trait BudgetProvider {
    /// Fetches a single budget by name. Unknown names are provider errors.
    fn fetch_one(&self, name: &str) -> Result<BudgetRecord>;

    /// Fetches the page that `token` continues, or the first page for `None`.
    fn fetch_page(&self, token: Option<&str>) -> Result<BudgetPage>;

    /// Walks every page in order. An account without budgets yields an empty list.
    fn fetch_all(&self) -> Result<Vec<BudgetRecord>> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut token: Option<String> = None;
        loop {
            let page = self.fetch_page(token.as_deref())?;
            tracing::debug!(
                count = page.records.len(),
                next = page.next_token.as_deref().unwrap_or("-"),
                "fetched budget page"
            );
            records.extend(page.records);
            match page.next_token {
                Some(next) => {
                    if !seen.insert(next.clone()) {
                        return Err(ProbeError::Provider(format!(
                            "pagination token `{next}` repeated"
                        )));
                    }
                    token = Some(next);
                }
                None => break,
            }
        }
        Ok(records)
    }
}
