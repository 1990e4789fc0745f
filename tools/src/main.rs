//! report-runner: CLI entry point for the call-data QA reports.
//!
//! Usage:
//!   report-runner pareto   [--db callqa.db] [--out pareto.html] [--show]
//!   report-runner accuracy [--db callqa.db] [--out accuracy.html] [--show]
//!   report-runner import   [--db callqa.db] [--data-dir ./data]
//!
//! A --config FILE (JSON) overrides the database path, the reporting date
//! window, and the chart styling.

use anyhow::{bail, Result};
use callqa_core::{
    accuracy::build_accuracy,
    config::ReportConfig,
    import::import_data_dir,
    pareto::build_pareto,
    plot::{accuracy_chart, pareto_chart},
    store::ReportStore,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("");

    let mut config = match find_arg(&args, "--config") {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(db) = find_arg(&args, "--db") {
        config.db_path = db.to_string();
    }
    let show = args.iter().any(|a| a == "--show");

    match mode {
        "pareto" => run_pareto(&config, find_arg(&args, "--out").unwrap_or("pareto.html"), show),
        "accuracy" => {
            run_accuracy(&config, find_arg(&args, "--out").unwrap_or("accuracy.html"), show)
        }
        "import" => run_import(&config, find_arg(&args, "--data-dir").unwrap_or("./data")),
        _ => bail!("usage: report-runner <pareto|accuracy|import> [options]"),
    }
}

fn run_pareto(config: &ReportConfig, out: &str, show: bool) -> Result<()> {
    let store = ReportStore::open(&config.db_path)?;
    let counts = store.failure_counts(config.window_start, config.window_end)?;
    let table = build_pareto(&counts)?;

    let total = table.rows.last().map(|r| r.cumulative_sum).unwrap_or(0);
    println!("Failure Pareto");
    println!("  db:         {}", config.db_path);
    println!("  window:     {} .. {}", config.window_start, config.window_end);
    println!("  attributes: {}", table.labels.len());
    println!("  failures:   {total}");

    write_chart(pareto_chart(&table, &config.chart), out, show)
}

fn run_accuracy(config: &ReportConfig, out: &str, show: bool) -> Result<()> {
    let store = ReportStore::open(&config.db_path)?;
    let failed = store.failed_counts_by_month(config.window_start, config.window_end)?;
    let totals = store.total_counts_by_month(config.window_start, config.window_end)?;
    let points = build_accuracy(&failed, &totals)?;

    let employees: std::collections::BTreeSet<&str> =
        points.iter().map(|p| p.name.as_str()).collect();
    println!("Accuracy Time Series");
    println!("  db:         {}", config.db_path);
    println!("  window:     {} .. {}", config.window_start, config.window_end);
    println!("  employees:  {}", employees.len());
    println!("  datapoints: {}", points.len());

    write_chart(accuracy_chart(&points, &config.chart), out, show)
}

fn run_import(config: &ReportConfig, data_dir: &str) -> Result<()> {
    let store = ReportStore::open(&config.db_path)?;
    store.migrate()?;
    let (employees, attributes, transactions, links) =
        import_data_dir(&store, Path::new(data_dir))?;

    println!("Imported into {}", config.db_path);
    println!("  employees:              {employees}");
    println!("  attributes:             {attributes}");
    println!("  transactions:           {transactions}");
    println!("  transaction attributes: {links}");
    Ok(())
}

fn write_chart(plot: plotly::Plot, out: &str, show: bool) -> Result<()> {
    plot.write_html(out);
    println!("  chart:      {out}");
    if show {
        plot.show();
    }
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
