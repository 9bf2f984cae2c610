//! Group-and-sum aggregation by the key column.

use crate::error::Result;
use crate::models::{AggregatedRow, Dataset};
use polars::prelude::*;
use tracing::debug;

const KEY_ALIAS: &str = "__key";
const TOTAL_ALIAS: &str = "__total";

/// Sum `measure` for every distinct value of `key`.
///
/// The measure is cast to float non-strictly, so missing or non-numeric
/// values contribute nothing to their group's total. `NaN` and infinite
/// cells count as non-numeric too, keeping every total finite. Rows without a key are
/// dropped. Groups come back in order of first appearance, which is what the
/// top-N selector relies on to break ties.
pub fn aggregate(dataset: &Dataset, key: &str, measure: &str) -> Result<Vec<AggregatedRow>> {
    let grouped = dataset
        .frame()
        .clone()
        .lazy()
        .select([
            col(key).cast(DataType::String).alias(KEY_ALIAS),
            col(measure).cast(DataType::Float64).alias(TOTAL_ALIAS),
        ])
        .filter(col(KEY_ALIAS).is_not_null())
        .with_column(
            when(col(TOTAL_ALIAS).is_finite())
                .then(col(TOTAL_ALIAS))
                .otherwise(lit(0.0))
                .alias(TOTAL_ALIAS),
        )
        .group_by_stable([col(KEY_ALIAS)])
        .agg([col(TOTAL_ALIAS).sum()])
        .collect()?;

    let keys = grouped.column(KEY_ALIAS)?.str()?;
    let totals = grouped.column(TOTAL_ALIAS)?.f64()?;

    let rows: Vec<AggregatedRow> = keys
        .into_iter()
        .zip(totals)
        .filter_map(|(key, total)| Some(AggregatedRow::new(key?, total.unwrap_or(0.0))))
        .collect();

    debug!(
        "Aggregated {} rows into {} groups",
        dataset.height(),
        rows.len()
    );
    Ok(rows)
}
