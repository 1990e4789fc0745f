//! Failure Pareto aggregation.
//!
//! Shapes (failure_count, attribute_text) rows into the table behind the
//! bar+line failure chart: counts sorted ascending with a running
//! cumulative sum and cumulative percentage.
//!
//! POLICY: only the counts are sorted. Attribute labels keep the order the
//! query returned them in, so displayed label order is decoupled from bar
//! height order. This reproduces the established report output and callers
//! must treat it as fixed behavior.

use serde::Serialize;

use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoRow {
    pub fails: i64,
    pub cumulative_sum: i64,
    pub cumulative_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParetoTable {
    /// Attribute texts in query order (see module policy note).
    pub labels: Vec<String>,
    /// One row per count, ascending by count.
    pub rows: Vec<ParetoRow>,
}

/// Build the Pareto table from (failure_count, attribute_text) pairs.
///
/// Fails with [`ReportError::ZeroTotalFailures`] when the counts sum to
/// zero, rather than producing NaN or infinite percentages.
pub fn build_pareto(counts: &[(i64, String)]) -> ReportResult<ParetoTable> {
    let labels: Vec<String> = counts.iter().map(|(_, text)| text.clone()).collect();

    let mut fails: Vec<i64> = counts.iter().map(|(n, _)| *n).collect();
    fails.sort_unstable();

    let total: i64 = fails.iter().sum();
    if total == 0 {
        return Err(ReportError::ZeroTotalFailures);
    }

    let mut rows = Vec::with_capacity(fails.len());
    let mut running = 0i64;
    for n in fails {
        running += n;
        rows.push(ParetoRow {
            fails: n,
            cumulative_sum: running,
            cumulative_percent: round2(100.0 * running as f64 / total as f64),
        });
    }

    Ok(ParetoTable { labels, rows })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
