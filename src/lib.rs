#![doc(test(attr(deny(warnings))))]

//! Budget Probe checks cloud cost budgets for an Icinga/Nagios supervisor.
//!
//! A run fetches budget records from a [`provider::BudgetProvider`],
//! classifies each one with the [`evaluator`] (forecast first, actual spend
//! as fallback) and folds the results into a single [`model::Verdict`] with
//! the [`reporter`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod model;
pub mod probe;
pub mod provider;
pub mod reporter;
pub mod utils;

pub use errors::{ProbeError, Result};
pub use model::{BudgetRecord, ClassificationResult, ComparisonBasis, Money, Severity, Verdict};
pub use probe::{run, Selection};
pub use provider::{BudgetPage, BudgetProvider, BudgetSource, JsonProvider};
