//! Chart layout tests, asserted against the serialized Plotly figures.

use callqa_core::accuracy::AccuracyPoint;
use callqa_core::config::ChartStyle;
use callqa_core::pareto::build_pareto;
use callqa_core::plot::{accuracy_chart, pareto_chart};
use serde_json::{json, Value};

fn to_value(plot: &plotly::Plot) -> Value {
    serde_json::from_str(&plot.to_json()).unwrap()
}

/// The count axis must auto-scale with the data. A fixed percentage-style
/// range would clip any attribute with more failures than the range top.
#[test]
fn pareto_count_axis_is_not_clamped() {
    let counts = vec![(500, "hold procedure".to_string()), (10, "greeting".to_string())];
    let table = build_pareto(&counts).unwrap();
    let figure = to_value(&pareto_chart(&table, &ChartStyle::default()));

    assert!(
        figure["layout"]["yaxis"].get("range").is_none(),
        "count axis should auto-range, found {:?}",
        figure["layout"]["yaxis"]["range"]
    );
}

/// The percent axis keeps its fixed range with headroom, but labels ticks
/// only at 0 through 100.
#[test]
fn pareto_percent_axis_ticks_stop_at_100() {
    let counts = vec![(10, "a".to_string()), (20, "b".to_string())];
    let table = build_pareto(&counts).unwrap();
    let figure = to_value(&pareto_chart(&table, &ChartStyle::default()));

    let y2 = &figure["layout"]["yaxis2"];
    assert_eq!(y2["range"], json!([0.0, 125.0]));
    assert_eq!(y2["tickvals"], json!([0.0, 25.0, 50.0, 75.0, 100.0]));
}

/// A series is plotted in calendar order with duplicate months averaged,
/// regardless of the order the merged rows arrived in.
#[test]
fn accuracy_series_sorted_and_averaged_by_month() {
    let point = |month: &str, accuracy: f64| AccuracyPoint {
        name: "Ana Jensen".into(),
        month: month.into(),
        accuracy,
    };
    // Out of order, with January appearing twice (month-only join fan-out).
    let points = vec![point("2020-02", 80.0), point("2020-01", 40.0), point("2020-01", 60.0)];

    let figure = to_value(&accuracy_chart(&points, &ChartStyle::default()));
    let trace = &figure["data"][0];

    assert_eq!(trace["name"], "Ana Jensen");
    assert_eq!(trace["x"], json!(["2020-01", "2020-02"]));
    assert_eq!(trace["y"], json!([50.0, 80.0]));
}

/// The accuracy chart's percentage axis is labeled 0 through 100 as well.
#[test]
fn accuracy_axis_ticks_stop_at_100() {
    let points = vec![AccuracyPoint {
        name: "Ana Jensen".into(),
        month: "2020-01".into(),
        accuracy: 60.0,
    }];
    let figure = to_value(&accuracy_chart(&points, &ChartStyle::default()));

    let y = &figure["layout"]["yaxis"];
    assert_eq!(y["range"], json!([0.0, 125.0]));
    assert_eq!(y["tickvals"], json!([0.0, 25.0, 50.0, 75.0, 100.0]));
}
