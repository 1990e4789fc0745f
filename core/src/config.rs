use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Styling for the rendered charts.
///
/// Passed explicitly to the rendering functions; nothing in the plotting
/// layer mutates shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartStyle {
    pub font_family: String,
    pub width: usize,
    pub height: usize,
    /// Percentage axes render 0–100 but reserve headroom for annotations.
    pub percent_axis_max: f64,
    pub percent_axis_step: f64,
    /// X tick label rotation, degrees.
    pub label_rotation: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: "STIXGeneral, serif".into(),
            width: 1075,
            height: 750,
            percent_axis_max: 125.0,
            percent_axis_step: 25.0,
            label_rotation: 45.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub db_path: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    #[serde(default)]
    pub chart: ChartStyle,
}

impl ReportConfig {
    /// Load from a JSON config file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ReportConfig {
    /// The reporting window the source dataset covers: Jan 1 – Sep 30 2020.
    fn default() -> Self {
        Self {
            db_path: "callqa.db".into(),
            window_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            window_end: NaiveDate::from_ymd_opt(2020, 9, 30).unwrap(),
            chart: ChartStyle::default(),
        }
    }
}
