use std::{
    cell::OnceCell,
    fs,
    io::{self, Read},
    path::PathBuf,
};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    errors::{ProbeError, Result},
    model::{BudgetRecord, Money},
};

use super::{BudgetPage, BudgetProvider};

/// Where the JSON budget document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetSource {
    File(PathBuf),
    Stdin,
    Inline(String),
}

impl BudgetSource {
    /// `-` selects standard input, anything else is a file path.
    pub fn from_arg(value: &str) -> Self {
        if value == "-" {
            BudgetSource::Stdin
        } else {
            BudgetSource::File(PathBuf::from(value))
        }
    }

    /// Like [`BudgetSource::from_arg`] but keeps non-UTF-8 paths intact.
    pub fn from_path(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            BudgetSource::Stdin
        } else {
            BudgetSource::File(path)
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            BudgetSource::File(path) => fs::read_to_string(path).map_err(|err| {
                ProbeError::Provider(format!("cannot read {}: {err}", path.display()))
            }),
            BudgetSource::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
            BudgetSource::Inline(text) => Ok(text.clone()),
        }
    }
}

/// Serves budgets from `DescribeBudgets`/`DescribeBudget` shaped JSON.
///
/// The document may contain several response objects back to back; each one
/// is treated as a page, in order. The source is read once and cached.
#[derive(Debug)]
pub struct JsonProvider {
    source: BudgetSource,
    pages: OnceCell<Vec<WirePage>>,
}

impl JsonProvider {
    pub fn new(source: BudgetSource) -> Self {
        Self {
            source,
            pages: OnceCell::new(),
        }
    }

    pub fn from_json(text: impl Into<String>) -> Self {
        Self::new(BudgetSource::Inline(text.into()))
    }

    pub fn source(&self) -> &BudgetSource {
        &self.source
    }

    fn pages(&self) -> Result<&[WirePage]> {
        if let Some(pages) = self.pages.get() {
            return Ok(pages.as_slice());
        }
        let text = self.source.read()?;
        let pages = parse_pages(&text)?;
        tracing::info!(pages = pages.len(), source = ?self.source, "loaded budget document");
        Ok(self.pages.get_or_init(|| pages).as_slice())
    }
}

impl BudgetProvider for JsonProvider {
    fn fetch_one(&self, name: &str) -> Result<BudgetRecord> {
        self.pages()?
            .iter()
            .flat_map(|page| page.budgets.iter())
            .find(|budget| budget.budget_name.as_deref() == Some(name))
            .ok_or_else(|| ProbeError::Provider(format!("budget `{name}` not found")))?
            .clone()
            .into_record()
    }

    fn fetch_page(&self, token: Option<&str>) -> Result<BudgetPage> {
        let pages = self.pages()?;
        let index = match token {
            None => 0,
            Some(token) => {
                pages
                    .iter()
                    .position(|page| page.next_token.as_deref() == Some(token))
                    .ok_or_else(|| {
                        ProbeError::Provider(format!("unknown pagination token `{token}`"))
                    })?
                    + 1
            }
        };
        match pages.get(index) {
            Some(page) => page.to_budget_page(),
            None => Ok(BudgetPage::default()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SingleBudgetResponse {
    budget: WireBudget,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BudgetsPageResponse {
    #[serde(default)]
    budgets: Vec<WireBudget>,
    #[serde(default)]
    next_token: Option<String>,
}

/// One page as read, before records are validated.
#[derive(Debug)]
struct WirePage {
    budgets: Vec<WireBudget>,
    next_token: Option<String>,
}

impl WirePage {
    fn to_budget_page(&self) -> Result<BudgetPage> {
        let records = self
            .budgets
            .iter()
            .cloned()
            .map(WireBudget::into_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(BudgetPage {
            records,
            next_token: self.next_token.clone(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireBudget {
    #[serde(default)]
    budget_name: Option<String>,
    #[serde(default)]
    budget_limit: Option<WireSpend>,
    #[serde(default)]
    calculated_spend: Option<WireCalculatedSpend>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCalculatedSpend {
    #[serde(default)]
    actual_spend: Option<WireSpend>,
    #[serde(default)]
    forecasted_spend: Option<WireSpend>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSpend {
    amount: WireAmount,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireAmount {
    Text(String),
    Number(serde_json::Number),
}

impl WireSpend {
    fn into_money(self) -> Result<Money> {
        match self.amount {
            WireAmount::Text(text) => Money::parse(&text, self.unit),
            WireAmount::Number(number) => Money::parse(&number.to_string(), self.unit),
        }
    }
}

impl WireBudget {
    fn into_record(self) -> Result<BudgetRecord> {
        let name = self
            .budget_name
            .ok_or_else(|| ProbeError::MalformedRecord("budget without a name".into()))?;
        let limit = self
            .budget_limit
            .ok_or_else(|| ProbeError::MalformedRecord(format!("budget `{name}` has no limit")))?
            .into_money()?;
        let (actual_spend, forecasted_spend) = match self.calculated_spend {
            Some(spend) => (
                spend.actual_spend.map(WireSpend::into_money).transpose()?,
                spend.forecasted_spend.map(WireSpend::into_money).transpose()?,
            ),
            None => (None, None),
        };
        Ok(BudgetRecord {
            name,
            limit,
            forecasted_spend,
            actual_spend,
        })
    }
}

/// Splits a document into pages, giving unlabelled pages positional tokens.
///
/// Records stay unvalidated here so a lookup by name only checks the budget
/// it returns.
fn parse_pages(text: &str) -> Result<Vec<WirePage>> {
    let mut raw = Vec::new();
    for value in serde_json::Deserializer::from_str(text).into_iter::<Value>() {
        raw.push(parse_document(value?)?);
    }

    let total = raw.len();
    let mut pages = Vec::with_capacity(total);
    for (index, (budgets, next_token)) in raw.into_iter().enumerate() {
        let has_next = index + 1 < total;
        let next_token = match (next_token, has_next) {
            (Some(token), true) => Some(token),
            (None, true) => Some(format!("#{}", index + 1)),
            (Some(token), false) => {
                return Err(ProbeError::Provider(format!(
                    "budget listing truncated after token `{token}`"
                )))
            }
            (None, false) => None,
        };
        pages.push(WirePage {
            budgets,
            next_token,
        });
    }
    Ok(pages)
}

fn parse_document(value: Value) -> Result<(Vec<WireBudget>, Option<String>)> {
    if !value.is_object() {
        return Err(ProbeError::Provider(
            "invalid budget data: expected a JSON object".into(),
        ));
    }
    if value.get("Budget").is_some() {
        let single: SingleBudgetResponse = serde_json::from_value(value)?;
        return Ok((vec![single.budget], None));
    }
    let page: BudgetsPageResponse = serde_json::from_value(value)?;
    Ok((page.budgets, page.next_token))
}
