//! Configuration management and validation.
//!
//! Provides the dashboard configuration (server address, data source,
//! chart defaults) and the column matching rules used to locate the
//! key, measure and date columns of a dataset.

use crate::constants::{
    DATE_COLUMN_TERMS, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_INFER_SCHEMA_LENGTH,
    DEFAULT_PAGE_TITLE, DEFAULT_PORT, DEFAULT_SERIES_COLUMNS, DEFAULT_SOURCE_URL, DEFAULT_TOP_N,
    KEY_COLUMN_TERMS, MEASURE_COLUMN_TERMS,
};
use crate::error::{DashboardError, Result};
use crate::models::{ChartKind, ColumnRole};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Substring predicate identifying the column for one role.
///
/// A column name matches when, lowercased, it contains every term of at
/// least one alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMatcher {
    pub alternatives: Vec<Vec<String>>,
}

impl ColumnMatcher {
    pub fn new(alternatives: &[&[&str]]) -> Self {
        Self {
            alternatives: alternatives
                .iter()
                .map(|terms| terms.iter().map(|term| term.to_lowercase()).collect())
                .collect(),
        }
    }

    /// Check a single column name against the predicate
    pub fn matches(&self, column_name: &str) -> bool {
        let lowered = column_name.to_lowercase();
        self.alternatives.iter().any(|terms| {
            !terms.is_empty()
                && terms
                    .iter()
                    .all(|term| lowered.contains(term.to_lowercase().as_str()))
        })
    }

    fn is_usable(&self) -> bool {
        !self.alternatives.is_empty()
            && self
                .alternatives
                .iter()
                .all(|terms| !terms.is_empty() && terms.iter().all(|term| !term.is_empty()))
    }
}

/// Matchers for every semantic column role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRules {
    pub key: ColumnMatcher,
    pub measure: ColumnMatcher,
    pub date: ColumnMatcher,
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            key: ColumnMatcher::new(KEY_COLUMN_TERMS),
            measure: ColumnMatcher::new(MEASURE_COLUMN_TERMS),
            date: ColumnMatcher::new(DATE_COLUMN_TERMS),
        }
    }
}

impl ColumnRules {
    pub fn matcher(&self, role: ColumnRole) -> &ColumnMatcher {
        match role {
            ColumnRole::Key => &self.key,
            ColumnRole::Measure => &self.measure,
            ColumnRole::Date => &self.date,
        }
    }
}

/// Global configuration for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Remote CSV dataset URL
    pub source_url: String,

    /// Local CSV file used instead of the remote URL when set
    pub source_file: Option<PathBuf>,

    /// Timeout for one dataset download in seconds
    pub fetch_timeout_secs: u64,

    /// Chart rendered on the overview page when none is requested
    pub default_chart: ChartKind,

    /// Number of countries in the pie chart when none is requested
    pub top_n: usize,

    /// Column matching rules
    pub columns: ColumnRules,

    /// Daily sub-measures plotted for a single country
    pub series_columns: Vec<String>,

    /// Rows scanned for CSV type inference (None = whole file)
    pub infer_schema_length: Option<usize>,

    /// Title of the overview page
    pub page_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            source_file: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            default_chart: ChartKind::default(),
            top_n: DEFAULT_TOP_N,
            columns: ColumnRules::default(),
            series_columns: DEFAULT_SERIES_COLUMNS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            page_title: DEFAULT_PAGE_TITLE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the listen address
    pub fn with_listen(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Set the remote dataset URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Read the dataset from a local file instead of the network
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_default_chart(mut self, chart: ChartKind) -> Self {
        self.default_chart = chart;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_column_rules(mut self, columns: ColumnRules) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_series_columns(mut self, columns: Vec<String>) -> Self {
        self.series_columns = columns;
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Socket address string for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate settings that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        if self.source_file.is_none() && self.source_url.trim().is_empty() {
            return Err(DashboardError::configuration(
                "Either a source URL or a source file is required",
            ));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(DashboardError::configuration(
                "Fetch timeout must be greater than 0",
            ));
        }

        for role in [ColumnRole::Key, ColumnRole::Measure, ColumnRole::Date] {
            if !self.columns.matcher(role).is_usable() {
                return Err(DashboardError::configuration(format!(
                    "Column matcher for the {} role needs at least one non-empty term",
                    role
                )));
            }
        }

        if self.series_columns.len() < 2 {
            return Err(DashboardError::configuration(
                "At least two series columns are required for the time series chart",
            ));
        }

        if self.infer_schema_length == Some(0) {
            return Err(DashboardError::configuration(
                "Schema inference length must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_matcher_requires_all_terms_of_an_alternative() {
        let matcher = ColumnMatcher::new(&[&["case", "total"]]);

        assert!(matcher.matches("total_cases"));
        assert!(matcher.matches("Total_Cases_Per_Million"));
        assert!(!matcher.matches("new_cases"));
        assert!(!matcher.matches("total_deaths"));
    }

    #[test]
    fn test_matcher_accepts_any_alternative() {
        let matcher = ColumnMatcher::new(&[&["country"], &["location"]]);

        assert!(matcher.matches("Country"));
        assert!(matcher.matches("location_name"));
        assert!(!matcher.matches("nation"));
    }

    #[test]
    fn test_matcher_terms_are_case_insensitive() {
        let matcher = ColumnMatcher {
            alternatives: vec![vec!["COUNTRY".to_string()]],
        };
        assert!(matcher.matches("country"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.series_columns, vec!["new_cases", "new_deaths"]);
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        let config = DashboardConfig::default().with_fetch_timeout_secs(0);
        assert!(config.validate().is_err());

        let config = DashboardConfig::default().with_series_columns(vec!["new_cases".into()]);
        assert!(config.validate().is_err());

        let config = DashboardConfig::default().with_source_url("  ");
        assert!(config.validate().is_err());

        let config = DashboardConfig::default()
            .with_source_url("")
            .with_source_file("data.csv");
        assert!(config.validate().is_ok());

        let mut rules = ColumnRules::default();
        rules.measure.alternatives = vec![vec![String::new()]];
        let config = DashboardConfig::default().with_column_rules(rules);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"port": 8080, "top_n": 5, "columns": {{
                "key": {{"alternatives": [["nation"]]}},
                "measure": {{"alternatives": [["confirmed"]]}},
                "date": {{"alternatives": [["day"]]}}
            }}}}"#
        )
        .unwrap();

        let config = DashboardConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.columns.key.matches("Nation"));
        assert_eq!(config.default_chart, ChartKind::Map);
    }

    #[test]
    fn test_config_overriding_one_matcher_keeps_the_others() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"columns": {{"key": {{"alternatives": [["nation"]]}}}}}}"#
        )
        .unwrap();

        let config = DashboardConfig::from_json_file(file.path()).unwrap();
        assert!(config.columns.key.matches("nation"));
        assert!(!config.columns.key.matches("country"));
        assert_eq!(config.columns.measure, ColumnRules::default().measure);
        assert_eq!(config.columns.date, ColumnRules::default().date);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_missing_file_is_configuration_error() {
        let result = DashboardConfig::from_json_file(Path::new("/nonexistent/epichart.json"));
        assert!(matches!(
            result,
            Err(DashboardError::Configuration { .. })
        ));
    }
}
