//! Per-request orchestration.
//!
//! Every call fetches the dataset from the source, parses it and runs the
//! pipeline on a blocking thread, then hands back chart output. Nothing is
//! kept between calls.

use crate::chart::Figure;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::models::{AggregatedRow, ChartKind, Dataset};
use crate::page::{PageContext, PageRenderer};
use crate::pipeline::{Pipeline, parse_csv, top_n};
use crate::source::DatasetSource;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

const CHART_DIV_ID: &str = "epichart-figure";

/// Dashboard service shared by every request handler
#[derive(Clone)]
pub struct Dashboard {
    config: Arc<DashboardConfig>,
    source: Arc<dyn DatasetSource>,
    pipeline: Pipeline,
    pages: Arc<PageRenderer>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, source: Arc<dyn DatasetSource>) -> Result<Self> {
        let pipeline = Pipeline::from_config(&config);
        Ok(Self {
            config: Arc::new(config),
            source,
            pipeline,
            pages: Arc::new(PageRenderer::new()?),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Render the overview page with the requested chart
    pub async fn overview_page(&self, chart: Option<ChartKind>, top: Option<usize>) -> Result<String> {
        let chart = chart.unwrap_or(self.config.default_chart);
        let top = top.unwrap_or(self.config.top_n);

        let (figure, dataset) = self
            .with_dataset(move |pipeline, dataset| {
                let totals = pipeline.totals(&dataset)?;
                let figure = match chart {
                    ChartKind::Map => Figure::choropleth(&totals.rows, &totals.measure_column),
                    ChartKind::Pie => {
                        let title = format!(
                            "Top {} countries by {}",
                            top, totals.measure_column
                        );
                        Figure::pie(&top_n(totals.rows, top), title)
                    }
                };
                Ok((figure, dataset))
            })
            .await?;

        let context = PageContext::new(
            self.config.page_title.clone(),
            figure.to_html_fragment(CHART_DIV_ID)?,
            dataset.source_name(),
            dataset.fetched_at(),
            self.config.top_n,
        );
        self.pages.render_index(&context)
    }

    /// Line chart figure for one country's daily series
    pub async fn entity_figure(&self, entity: String) -> Result<Figure> {
        self.with_dataset(move |pipeline, dataset| {
            let series = pipeline.entity(&dataset, &entity)?;
            if series.is_empty() {
                debug!("No rows for '{}', returning an empty chart", entity);
            }
            Ok(Figure::time_series(&series))
        })
        .await
    }

    /// Top countries by summed measure
    pub async fn top_rows(&self, n: Option<usize>) -> Result<Vec<AggregatedRow>> {
        let n = n.unwrap_or(self.config.top_n);
        self.with_dataset(move |pipeline, dataset| pipeline.top(&dataset, n))
            .await
    }

    /// Fetch and parse the dataset, then run `work` on a blocking thread
    async fn with_dataset<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Pipeline, Dataset) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let start_time = Instant::now();
        let source_name = self.source.name();
        let bytes = self.source.fetch().await?;
        let fetched_at = Utc::now();

        let infer_schema_length = self.config.infer_schema_length;
        let pipeline = self.pipeline.clone();

        let result = task::spawn_blocking(move || {
            let dataset = parse_csv(bytes, infer_schema_length, &source_name, fetched_at)?;
            work(&pipeline, dataset)
        })
        .await
        .map_err(|e| DashboardError::Task {
            reason: e.to_string(),
        })??;

        info!(
            "Pipeline completed in {}ms",
            start_time.elapsed().as_millis()
        );
        Ok(result)
    }
}
