//! Dataset sources.
//!
//! A source produces the raw CSV bytes for one request. The HTTP source is
//! the production path; the file and in-memory sources serve offline use
//! and tests.

use crate::config::DashboardConfig;
use crate::constants::USER_AGENT;
use crate::error::{DashboardError, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Anything that can produce the raw CSV bytes of the dataset
pub trait DatasetSource: Send + Sync {
    /// Human-readable origin, shown in logs and on the page
    fn name(&self) -> String;

    /// Fetch the full dataset. Called once per request.
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>>;
}

/// Downloads the dataset over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn download(&self) -> Result<Vec<u8>> {
        debug!("Requesting {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Fetch {
                source_name: self.url.clone(),
                reason: format!("server responded with {}", status),
            });
        }

        let body = response.bytes().await?;
        info!("Downloaded {} bytes from {}", body.len(), self.url);
        Ok(body.to_vec())
    }
}

impl DatasetSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        self.download().boxed()
    }
}

/// Reads the dataset from a local CSV file on every request
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        async move {
            if !tokio::fs::try_exists(&self.path).await? {
                return Err(DashboardError::SourceFileNotFound {
                    path: self.path.clone(),
                });
            }
            let bytes = tokio::fs::read(&self.path).await?;
            debug!("Read {} bytes from {}", bytes.len(), self.path.display());
            Ok(bytes)
        }
        .boxed()
    }
}

/// Serves a fixed CSV payload
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    contents: Arc<[u8]>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let contents: Vec<u8> = contents.into();
        Self {
            name: name.into(),
            contents: Arc::from(contents),
        }
    }
}

impl DatasetSource for InMemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        let contents = self.contents.to_vec();
        async move { Ok(contents) }.boxed()
    }
}

/// Build the source selected by the configuration
pub fn from_config(config: &DashboardConfig) -> Result<Arc<dyn DatasetSource>> {
    match &config.source_file {
        Some(path) => Ok(Arc::new(FileSource::new(path.clone()))),
        None => Ok(Arc::new(HttpSource::new(
            config.source_url.clone(),
            config.fetch_timeout(),
        )?)),
    }
}
