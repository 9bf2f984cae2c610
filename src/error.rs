//! Error handling for dashboard operations.
//!
//! Provides error types with context for dataset fetching, column
//! resolution, aggregation, and page rendering failures.

use crate::models::ColumnRole;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {} column found in dataset (available columns: {})", .role, .available.join(", "))]
    ColumnNotFound {
        role: ColumnRole,
        available: Vec<String>,
    },

    #[error("Failed to fetch dataset from {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("Source file not found: {path}")]
    SourceFileNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Background task failed: {reason}")]
    Task { reason: String },
}

impl DashboardError {
    /// Create a column-not-found error listing the columns that were searched
    pub fn column_not_found(role: ColumnRole, available: &[String]) -> Self {
        Self::ColumnNotFound {
            role,
            available: available.to_vec(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error is caused by the dataset shape rather than the server
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. })
    }
}

impl From<handlebars::TemplateError> for DashboardError {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
