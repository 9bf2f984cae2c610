//! CSV ingestion into a request-scoped dataset.

use crate::error::{DashboardError, Result};
use crate::models::Dataset;
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::io::Cursor;
use tracing::debug;

/// Parse raw CSV bytes into a [`Dataset`].
///
/// The first line is the header. Column types are inferred from
/// `infer_schema_length` rows (the whole file when `None`), and ISO dates
/// are parsed so that date columns sort chronologically.
pub fn parse_csv(
    bytes: Vec<u8>,
    infer_schema_length: Option<usize>,
    source_name: &str,
    fetched_at: DateTime<Utc>,
) -> Result<Dataset> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(DashboardError::Fetch {
            source_name: source_name.to_string(),
            reason: "dataset is empty".to_string(),
        });
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    debug!(
        "Parsed {} rows x {} columns from {}",
        frame.height(),
        frame.width(),
        source_name
    );

    Ok(Dataset::new(frame, source_name, fetched_at))
}
