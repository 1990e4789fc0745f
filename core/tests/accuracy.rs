//! Accuracy time-series aggregator tests.

use callqa_core::accuracy::{accuracy_table, build_accuracy, left_join_on_month};
use callqa_core::types::MonthlyCount;
use callqa_core::ReportError;

fn row(name: &str, count: i64, month: &str) -> MonthlyCount {
    MonthlyCount {
        name: name.to_string(),
        count,
        month: month.to_string(),
    }
}

/// total=80, failed=20 gives accuracy = 100 × (80 − 20) / (80 + 20) = 60.0.
#[test]
fn accuracy_worked_example() {
    let failed = vec![row("Ana Jensen", 20, "2020-03")];
    let totals = vec![row("Ana Jensen", 80, "2020-03")];

    let points = build_accuracy(&failed, &totals).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].name, "Ana Jensen");
    assert_eq!(points[0].month, "2020-03");
    assert_eq!(points[0].accuracy, 60.0);
}

/// Left-join semantics: every failed row is preserved; a month with no
/// total-side match yields missing total values.
#[test]
fn join_preserves_unmatched_failed_months() {
    let failed = vec![row("Ana Jensen", 5, "2020-01"), row("Ana Jensen", 3, "2020-02")];
    let totals = vec![row("Ana Jensen", 45, "2020-01")];

    let merged = left_join_on_month(&failed, &totals);
    assert_eq!(merged.len(), 2);

    assert_eq!(merged[0].month, "2020-01");
    assert_eq!(merged[0].total_count, Some(45));
    assert_eq!(merged[0].total_name.as_deref(), Some("Ana Jensen"));

    assert_eq!(merged[1].month, "2020-02");
    assert_eq!(merged[1].total_count, None);
    assert_eq!(merged[1].total_name, None);
}

/// The join key is the month alone. A month shared by two employees on the
/// total side produces one merged row per match, with the name carried from
/// the total side.
#[test]
fn month_only_join_fans_out_across_employees() {
    let failed = vec![row("Ana Jensen", 4, "2020-05")];
    let totals = vec![
        row("Ana Jensen", 40, "2020-05"),
        row("Bo Madsen", 60, "2020-05"),
    ];

    let merged = left_join_on_month(&failed, &totals);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].total_name.as_deref(), Some("Ana Jensen"));
    assert_eq!(merged[1].total_name.as_deref(), Some("Bo Madsen"));
    // Both merged rows reuse the same failed count.
    assert!(merged.iter().all(|m| m.failed_count == 4));
}

/// A zero denominator (total + failed = 0) must fail explicitly instead of
/// propagating NaN into the chart.
#[test]
fn zero_denominator_is_an_error() {
    let failed = vec![row("Ana Jensen", 0, "2020-06")];
    let totals = vec![row("Ana Jensen", 0, "2020-06")];

    let err = build_accuracy(&failed, &totals).unwrap_err();
    assert!(matches!(err, ReportError::ZeroDenominator { .. }));
}

/// Merged rows without a total side carry no defined accuracy and are
/// dropped from the derived table.
#[test]
fn unmatched_rows_are_dropped_from_accuracy() {
    let failed = vec![row("Ana Jensen", 5, "2020-01"), row("Ana Jensen", 3, "2020-02")];
    let totals = vec![row("Ana Jensen", 45, "2020-01")];

    let merged = left_join_on_month(&failed, &totals);
    let points = accuracy_table(&merged).unwrap();

    assert_eq!(points.len(), 1);
    assert_eq!(points[0].month, "2020-01");
    assert_eq!(points[0].accuracy, 100.0 * (45.0 - 5.0) / 50.0);
}
