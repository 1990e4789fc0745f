//! Per-employee accuracy time-series aggregation.
//!
//! Merges two independently queried tables — failed counts and total counts
//! per (employee, month) — and derives an accuracy percentage per merged
//! row.
//!
//! POLICY: the merge joins on the month key only, not on (employee, month).
//! This matches the established report queries. When several employees have
//! transactions in the same month their counts combine across employees; the
//! join detects that condition and logs a warning instead of silently
//! widening the key.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    error::{ReportError, ReportResult},
    types::{Month, MonthlyCount},
};

/// One failed-side row joined against at most one total-side row.
/// Left-join semantics: failed rows with no matching month keep `None`
/// on the total side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub month: Month,
    pub failed_count: i64,
    /// Employee name from the total-transactions (right-hand) side.
    pub total_name: Option<String>,
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyPoint {
    pub name: String,
    pub month: Month,
    pub accuracy: f64,
}

/// Left-join the failed table onto the total table on the month key.
///
/// Every failed row is preserved. A failed row whose month matches several
/// total rows produces one merged row per match; a failed row with no match
/// yields a single row with missing total-side values.
pub fn left_join_on_month(failed: &[MonthlyCount], totals: &[MonthlyCount]) -> Vec<MergedRow> {
    let mut merged = Vec::with_capacity(failed.len());

    for f in failed {
        let matches: Vec<&MonthlyCount> =
            totals.iter().filter(|t| t.month == f.month).collect();

        let distinct_names: HashSet<&str> =
            matches.iter().map(|t| t.name.as_str()).collect();
        if distinct_names.len() > 1 {
            log::warn!(
                "month {} is shared by {} employees; month-only join combines their counts",
                f.month,
                distinct_names.len()
            );
        }

        if matches.is_empty() {
            merged.push(MergedRow {
                month: f.month.clone(),
                failed_count: f.count,
                total_name: None,
                total_count: None,
            });
        } else {
            for t in matches {
                merged.push(MergedRow {
                    month: f.month.clone(),
                    failed_count: f.count,
                    total_name: Some(t.name.clone()),
                    total_count: Some(t.count),
                });
            }
        }
    }

    merged
}

/// Derive accuracy per merged row: 100 × (total − failed) / (total + failed).
///
/// Rows with a zero denominator fail with [`ReportError::ZeroDenominator`]
/// rather than propagating NaN. Unmatched rows carry no total side and no
/// defined accuracy; they are dropped with a warning.
pub fn accuracy_table(merged: &[MergedRow]) -> ReportResult<Vec<AccuracyPoint>> {
    let mut points = Vec::with_capacity(merged.len());

    for row in merged {
        let (name, total) = match (&row.total_name, row.total_count) {
            (Some(name), Some(total)) => (name.clone(), total),
            _ => {
                log::warn!(
                    "no total-transaction counts for month {}; dropping row",
                    row.month
                );
                continue;
            }
        };

        let denominator = total + row.failed_count;
        if denominator == 0 {
            return Err(ReportError::ZeroDenominator {
                name,
                month: row.month.clone(),
            });
        }

        points.push(AccuracyPoint {
            name,
            month: row.month.clone(),
            accuracy: 100.0 * (total - row.failed_count) as f64 / denominator as f64,
        });
    }

    Ok(points)
}

/// Convenience: join and derive in one step.
pub fn build_accuracy(
    failed: &[MonthlyCount],
    totals: &[MonthlyCount],
) -> ReportResult<Vec<AccuracyPoint>> {
    accuracy_table(&left_join_on_month(failed, totals))
}
