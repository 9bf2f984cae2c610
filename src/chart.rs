//! Chart figures.
//!
//! Converts pipeline output into plotly.js figures. A figure serializes to
//! the `{"data": [...], "layout": {...}}` JSON that `Plotly.newPlot`
//! accepts, either as a standalone document or embedded in page markup.

use crate::constants::{CHOROPLETH_COLOR_SCALE, CHOROPLETH_LOCATION_MODE};
use crate::error::Result;
use crate::models::{AggregatedRow, EntitySubseries};
use serde::{Deserialize, Serialize};

/// A single plotly trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choropleth {
        locations: Vec<String>,
        z: Vec<f64>,
        locationmode: String,
        colorscale: String,
        hovertext: Vec<String>,
        colorbar: ColorBar,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    Scatter {
        name: String,
        mode: String,
        x: Vec<Option<String>>,
        y: Vec<Option<f64>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// World map coloured by each country's total
    pub fn choropleth(rows: &[AggregatedRow], measure_label: &str) -> Self {
        let locations: Vec<String> = rows.iter().map(|row| row.key.clone()).collect();

        Self {
            data: vec![Trace::Choropleth {
                hovertext: locations.clone(),
                locations,
                z: rows.iter().map(|row| row.total).collect(),
                locationmode: CHOROPLETH_LOCATION_MODE.to_string(),
                colorscale: CHOROPLETH_COLOR_SCALE.to_string(),
                colorbar: ColorBar {
                    title: Title::new(measure_label),
                },
            }],
            layout: Layout::default(),
        }
    }

    /// Share of the total held by each of the given countries
    pub fn pie(rows: &[AggregatedRow], title: impl Into<String>) -> Self {
        Self {
            data: vec![Trace::Pie {
                labels: rows.iter().map(|row| row.key.clone()).collect(),
                values: rows.iter().map(|row| row.total).collect(),
            }],
            layout: Layout {
                title: Some(Title::new(title)),
                ..Layout::default()
            },
        }
    }

    /// One line per series column over the entity's dates.
    ///
    /// An empty subseries still yields one (empty) trace per series so the
    /// client renders blank axes.
    pub fn time_series(series: &EntitySubseries) -> Self {
        let dates = series.dates();
        let data = series
            .series_names
            .iter()
            .enumerate()
            .map(|(index, name)| Trace::Scatter {
                name: name.clone(),
                mode: "lines".to_string(),
                x: dates.clone(),
                y: series.values(index),
            })
            .collect();

        Self {
            data,
            layout: Layout {
                title: Some(Title::new(format!("Daily cases and deaths in {}", series.entity))),
                xaxis: Some(Axis {
                    title: Title::new("Date"),
                }),
                yaxis: Some(Axis {
                    title: Title::new("Count"),
                }),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Markup fragment that draws the figure into a fresh `<div>`.
    ///
    /// Requires plotly.js to be loaded by the surrounding page.
    pub fn to_html_fragment(&self, div_id: &str) -> Result<String> {
        let data = script_safe(&serde_json::to_string(&self.data)?);
        let layout = script_safe(&serde_json::to_string(&self.layout)?);

        Ok(format!(
            "<div id=\"{id}\" class=\"plotly-graph-div\" style=\"height:100%; width:100%;\"></div>\n\
             <script type=\"text/javascript\">\n\
             Plotly.newPlot(\"{id}\", {data}, {layout}, {{\"responsive\": true}});\n\
             </script>",
            id = div_id,
            data = data,
            layout = layout,
        ))
    }
}

/// Keep JSON from closing the enclosing `<script>` element early
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
