//! Application constants for the dashboard
//!
//! Default values for the data source, server, column matching and
//! chart styling used throughout the application.

// =============================================================================
// Data Source
// =============================================================================

/// Public mpox case dataset published by Our World in Data
pub const DEFAULT_SOURCE_URL: &str =
    "https://catalog.ourworldindata.org/explorers/who/latest/monkeypox/monkeypox.csv";

/// Timeout for a single dataset download
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// User agent sent with dataset requests
pub const USER_AGENT: &str = concat!("epichart/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Server
// =============================================================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Column Matching
// =============================================================================

/// Any of these terms identifies the grouping key column
pub const KEY_COLUMN_TERMS: &[&[&str]] = &[&["country"], &["location"]];

/// All of these terms must appear in the measure column name
pub const MEASURE_COLUMN_TERMS: &[&[&str]] = &[&["case", "total"]];

pub const DATE_COLUMN_TERMS: &[&[&str]] = &[&["date"]];

/// Daily sub-measures plotted on the per-country time series
pub const DEFAULT_SERIES_COLUMNS: &[&str] = &["new_cases", "new_deaths"];

// =============================================================================
// Pipeline & Charts
// =============================================================================

/// Default number of countries shown in the pie chart
pub const DEFAULT_TOP_N: usize = 10;

/// Rows used for CSV schema inference (None scans the whole file)
pub const DEFAULT_INFER_SCHEMA_LENGTH: Option<usize> = None;

pub const DEFAULT_PAGE_TITLE: &str = "Mpox Cases by Country";

/// Plotly location mode for country-name keys
pub const CHOROPLETH_LOCATION_MODE: &str = "country names";

pub const CHOROPLETH_COLOR_SCALE: &str = "Viridis";

/// plotly.js bundle loaded by the page shell
pub const PLOTLY_JS_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
