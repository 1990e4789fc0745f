//! Chart rendering.
//!
//! Pure presentation: small functions converting the aggregated tables into
//! `plotly::Plot` figures. No business logic beyond axis scaling and label
//! rotation.

use std::collections::BTreeMap;

use plotly::common::{AxisSide, Font, Line, Marker, Mode, Position};
use plotly::layout::{Annotation, Axis, Layout};
use plotly::{Bar, Plot, Scatter};

use crate::{
    accuracy::AccuracyPoint,
    config::ChartStyle,
    pareto::ParetoTable,
};

/// Bar chart of failure counts with the cumulative-percentage line overlaid
/// on a secondary right-hand axis. Each bar and each line point is
/// annotated with its value.
pub fn pareto_chart(table: &ParetoTable, style: &ChartStyle) -> Plot {
    let fails: Vec<i64> = table.rows.iter().map(|r| r.fails).collect();
    let percents: Vec<f64> = table.rows.iter().map(|r| r.cumulative_percent).collect();
    let percent_labels: Vec<String> = percents.iter().map(|p| format!("{p}%")).collect();

    let mut plot = Plot::new();

    plot.add_trace(
        Bar::new(table.labels.clone(), fails.clone()).name("No. failed"),
    );

    plot.add_trace(
        Scatter::new(table.labels.clone(), percents)
            .name("Accumulated Percentage")
            .mode(Mode::LinesMarkersText)
            .text_array(percent_labels)
            .text_position(Position::TopCenter)
            .line(Line::new().color("black"))
            .marker(Marker::new().size(8))
            .y_axis("y2"),
    );

    // Bar value annotations, bold, just above each bar.
    let annotations: Vec<Annotation> = fails
        .iter()
        .enumerate()
        .map(|(i, n)| {
            Annotation::new()
                .x(i as f64)
                .y(*n as f64)
                .y_shift(12.0)
                .text(format!("<b>{n}</b>"))
                .show_arrow(false)
        })
        .collect();

    plot.set_layout(
        Layout::new()
            .title("Failed Transaction Attributes")
            .width(style.width)
            .height(style.height)
            .font(Font::new().family(&style.font_family))
            .x_axis(Axis::new().tick_angle(style.label_rotation))
            // Counts auto-scale; only the percent axis is fixed.
            .y_axis(Axis::new().title("No. failed"))
            .y_axis2(
                Axis::new()
                    .title("Accumulated Percentage")
                    .overlaying("y")
                    .side(AxisSide::Right)
                    .range(vec![0.0, style.percent_axis_max])
                    .tick_values(percent_ticks(style.percent_axis_step))
                    .tick_suffix("%"),
            )
            .annotations(annotations),
    );

    plot
}

/// Multi-series line chart of accuracy per month, one colored trace per
/// employee.
///
/// The month-only join can fan one month out into several merged rows, so a
/// series may carry duplicate months. Duplicates are averaged and each
/// series is plotted in calendar order.
pub fn accuracy_chart(points: &[AccuracyPoint], style: &ChartStyle) -> Plot {
    // Outer BTreeMap for a stable trace (and legend) order, inner for
    // month-sorted datapoints. Values accumulate (sum, count) per month.
    let mut series: BTreeMap<&str, BTreeMap<&str, (f64, u32)>> = BTreeMap::new();
    for p in points {
        let bucket = series
            .entry(&p.name)
            .or_default()
            .entry(&p.month)
            .or_insert((0.0, 0));
        bucket.0 += p.accuracy;
        bucket.1 += 1;
    }

    let mut plot = Plot::new();
    for (name, buckets) in series {
        let months: Vec<String> = buckets.keys().map(|m| m.to_string()).collect();
        let accuracies: Vec<f64> = buckets.values().map(|(sum, n)| sum / *n as f64).collect();
        plot.add_trace(
            Scatter::new(months, accuracies)
                .name(name)
                .mode(Mode::LinesMarkers)
                .marker(Marker::new().size(8)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title("Accuracy Rate")
            .width(style.width)
            .height(style.height)
            .font(Font::new().family(&style.font_family))
            .x_axis(Axis::new().tick_angle(style.label_rotation))
            .y_axis(
                Axis::new()
                    .title("Accuracy Rate")
                    .range(vec![0.0, style.percent_axis_max])
                    .tick_values(percent_ticks(style.percent_axis_step)),
            ),
    );

    plot
}

/// Tick positions for a percentage axis: 0 through 100 in `step` increments.
/// The axis range keeps headroom above 100 for annotations, but that
/// headroom stays unlabeled.
fn percent_ticks(step: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut v = 0.0;
    while v <= 100.0 {
        ticks.push(v);
        if step <= 0.0 {
            break;
        }
        v += step;
    }
    ticks
}
