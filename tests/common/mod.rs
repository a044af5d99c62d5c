#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

/// One budget entry in `DescribeBudgets` response shape.
pub fn budget(name: &str, limit: &str, actual: &str, forecast: Option<&str>) -> Value {
    let mut spend = json!({ "ActualSpend": { "Amount": actual, "Unit": "USD" } });
    if let Some(forecast) = forecast {
        spend["ForecastedSpend"] = json!({ "Amount": forecast, "Unit": "USD" });
    }
    json!({
        "BudgetName": name,
        "BudgetLimit": { "Amount": limit, "Unit": "USD" },
        "CalculatedSpend": spend,
        "BudgetType": "COST",
        "TimeUnit": "MONTHLY"
    })
}

pub fn page(budgets: Vec<Value>) -> String {
    json!({ "Budgets": budgets }).to_string()
}

/// Writes `contents` to a fresh temp dir. Keep the guard alive while the
/// file is in use.
pub fn write_fixture(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("budgets.json");
    std::fs::write(&path, contents).expect("write budget fixture");
    (dir, path)
}
