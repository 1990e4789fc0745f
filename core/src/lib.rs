//! callqa-core: query, aggregate, and chart call-center QA transaction data.
//!
//! Pipeline: `store` runs the SQL, `pareto`/`accuracy` shape the rows into
//! plottable tables, `plot` turns those tables into Plotly figures. `import`
//! loads the source CSV files into a local working database.

pub mod accuracy;
pub mod config;
pub mod error;
pub mod import;
pub mod pareto;
pub mod plot;
pub mod store;
pub mod types;

pub use error::{ReportError, ReportResult};
