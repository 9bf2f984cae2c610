//! Epichart Library
//!
//! Downloads a public epidemiological CSV dataset, aggregates case counts by
//! country and serves the result as interactive charts.
//!
//! This library provides tools for:
//! - Parsing the CSV dataset into a request-scoped polars frame
//! - Locating the country, case-total and date columns by name
//! - Summing cases per country and selecting the top N
//! - Extracting one country's daily series in date order
//! - Building plotly figures and serving them over HTTP

pub mod chart;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod page;
pub mod pipeline;
pub mod server;
pub mod source;

// Re-export commonly used types
pub use config::{ColumnMatcher, ColumnRules, DashboardConfig};
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use models::{AggregatedRow, ChartKind, ColumnRole, Dataset, EntitySubseries};
