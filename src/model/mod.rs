//! Budget records and the transient results derived from them during a run.

pub mod record;
pub mod verdict;

pub use record::{BudgetRecord, Money};
pub use verdict::{ClassificationResult, ComparisonBasis, Severity, Verdict};
