//! Per-entity time series extraction.

use crate::error::{DashboardError, Result};
use crate::models::{ColumnRole, Dataset, EntitySubseries, SeriesPoint};
use polars::prelude::*;
use tracing::debug;

const DATE_ALIAS: &str = "__date";

/// Rows where `key` equals `entity`, ascending by `date`.
///
/// The key is compared as text. An entity with no rows yields an empty
/// subseries rather than an error; a missing series column is reported as
/// [`DashboardError::ColumnNotFound`] for the measure role.
pub fn entity_series(
    dataset: &Dataset,
    key: &str,
    date: &str,
    entity: &str,
    series_columns: &[String],
) -> Result<EntitySubseries> {
    let available = dataset.columns();
    if let Some(missing) = series_columns
        .iter()
        .find(|name| !available.iter().any(|column| column == *name))
    {
        debug!("Series column '{}' missing from dataset", missing);
        return Err(DashboardError::column_not_found(
            ColumnRole::Measure,
            &available,
        ));
    }

    let mut selection = vec![col(date).alias(DATE_ALIAS)];
    selection.extend(
        series_columns
            .iter()
            .map(|name| col(name.as_str()).cast(DataType::Float64)),
    );

    let filtered = dataset
        .frame()
        .clone()
        .lazy()
        .filter(col(key).cast(DataType::String).eq(lit(entity)))
        .select(selection)
        .sort_by_exprs(
            [col(DATE_ALIAS)],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .with_column(col(DATE_ALIAS).cast(DataType::String))
        .collect()?;

    let dates = filtered.column(DATE_ALIAS)?.str()?;
    let series = series_columns
        .iter()
        .map(|name| filtered.column(name.as_str())?.f64().cloned())
        .collect::<PolarsResult<Vec<Float64Chunked>>>()?;

    let points = dates
        .into_iter()
        .enumerate()
        .map(|(row, date)| SeriesPoint {
            date: date.map(str::to_string),
            values: series.iter().map(|values| values.get(row)).collect(),
        })
        .collect::<Vec<_>>();

    debug!("Extracted {} points for '{}'", points.len(), entity);

    Ok(EntitySubseries {
        entity: entity.to_string(),
        series_names: series_columns.to_vec(),
        points,
    })
}
