//! Core data structures and types for the dashboard.
//!
//! Defines the per-request dataset, the semantic column roles used to
//! locate columns, and the chart-ready rows produced by the pipeline.

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role a column plays in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Categorical grouping key (country, location)
    Key,
    /// Numeric measure summed per key
    Measure,
    /// Observation date used to order an entity's subseries
    Date,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Key => "key",
            ColumnRole::Measure => "measure",
            ColumnRole::Date => "date",
        };
        f.write_str(name)
    }
}

/// Chart variants served on the overview page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Choropleth of every country
    #[default]
    Map,
    /// Pie chart of the top N countries
    Pie,
}

/// One fetched dataset. Lives for a single request.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    source_name: String,
    fetched_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(
        frame: DataFrame,
        source_name: impl Into<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            frame,
            source_name: source_name.into(),
            fetched_at,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Column names in their original order
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// When the source finished delivering the bytes
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// Summed measure for one distinct key value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub key: String,
    pub total: f64,
}

impl AggregatedRow {
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// Aggregated rows together with the columns they were computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub key_column: String,
    pub measure_column: String,
    pub rows: Vec<AggregatedRow>,
}

/// One dated observation in an entity's subseries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Date rendered as text (ISO 8601 when the source parsed as a date)
    pub date: Option<String>,
    /// One value per series column, in the subseries' column order
    pub values: Vec<Option<f64>>,
}

/// Rows belonging to a single key value, ascending by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySubseries {
    pub entity: String,
    pub series_names: Vec<String>,
    pub points: Vec<SeriesPoint>,
}

impl EntitySubseries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Dates of every point, in order
    pub fn dates(&self) -> Vec<Option<String>> {
        self.points.iter().map(|point| point.date.clone()).collect()
    }

    /// Values of the series at `index`, in date order
    pub fn values(&self, index: usize) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|point| point.values.get(index).copied().flatten())
            .collect()
    }
}
