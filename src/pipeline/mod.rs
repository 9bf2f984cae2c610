//! Data aggregation pipeline.
//!
//! Raw CSV ingestion, semantic column resolution, grouping and summing by
//! country, top-N selection, and per-country time series extraction. Each
//! stage is a pure transformation over a request-scoped [`Dataset`].

pub mod aggregator;
pub mod ingest;
pub mod resolver;
pub mod time_series;
pub mod top_n;

#[cfg(test)]
pub mod tests;

pub use aggregator::aggregate;
pub use ingest::parse_csv;
pub use resolver::resolve_column;
pub use time_series::entity_series;
pub use top_n::top_n;

use crate::config::{ColumnRules, DashboardConfig};
use crate::error::Result;
use crate::models::{AggregatedRow, Aggregation, ColumnRole, Dataset, EntitySubseries};
use tracing::debug;

/// Pipeline stages bound to one set of column rules
#[derive(Debug, Clone)]
pub struct Pipeline {
    rules: ColumnRules,
    series_columns: Vec<String>,
}

impl Pipeline {
    pub fn new(rules: ColumnRules, series_columns: Vec<String>) -> Self {
        Self {
            rules,
            series_columns,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.columns.clone(), config.series_columns.clone())
    }

    /// Sum the measure for every country in the dataset
    pub fn totals(&self, dataset: &Dataset) -> Result<Aggregation> {
        let columns = dataset.columns();
        let key = resolve_column(&columns, ColumnRole::Key, &self.rules)?;
        let measure = resolve_column(&columns, ColumnRole::Measure, &self.rules)?;
        debug!("Aggregating '{}' by '{}'", measure, key);

        let rows = aggregate(dataset, &key, &measure)?;
        Ok(Aggregation {
            key_column: key,
            measure_column: measure,
            rows,
        })
    }

    /// The `n` countries with the largest summed measure
    pub fn top(&self, dataset: &Dataset, n: usize) -> Result<Vec<AggregatedRow>> {
        let totals = self.totals(dataset)?;
        Ok(top_n(totals.rows, n))
    }

    /// Date-ordered subseries for one country
    pub fn entity(&self, dataset: &Dataset, entity: &str) -> Result<EntitySubseries> {
        let columns = dataset.columns();
        let key = resolve_column(&columns, ColumnRole::Key, &self.rules)?;
        let date = resolve_column(&columns, ColumnRole::Date, &self.rules)?;

        entity_series(dataset, &key, &date, entity, &self.series_columns)
    }
}
