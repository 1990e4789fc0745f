//! Shared primitive types used across the reporting pipeline.

use serde::{Deserialize, Serialize};

/// Calendar month key in `YYYY-MM` form, derived from the transaction date.
pub type Month = String;

/// One bucket from a grouped store query: how many transaction attributes
/// an employee accumulated in a given month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub name: String,
    pub count: i64,
    pub month: Month,
}
