#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Booth fixture data sources and load-boundary normalization.
//!
//! The dashboard consumes two static JSON documents: `master.json` and a
//! per-constituency detail file. The [`BoothDataSource`] trait abstracts
//! where they come from (local data directory or a remote base URL), and
//! [`normalize`] converts the defaulted raw schemas into canonical typed
//! records exactly once, at load time.

pub mod normalize;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use booth_map_data_models::{RawConstituency, RawMaster};

pub use normalize::{normalize, normalize_master};

/// Errors that can occur while fetching fixture documents.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for anything that can supply the two fixture documents.
#[async_trait]
pub trait BoothDataSource: Send + Sync {
    /// Fetches the district-level summary document (`master.json`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document cannot be fetched or
    /// parsed.
    async fn fetch_master(&self) -> Result<RawMaster, SourceError>;

    /// Fetches one constituency detail document by its `data_file` name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document cannot be fetched or
    /// parsed.
    async fn fetch_constituency(&self, data_file: &str) -> Result<RawConstituency, SourceError>;
}

/// Reads fixture documents from a local data directory.
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    /// Creates a source rooted at the given data directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this source reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<T, SourceError> {
        let path = self.root.join(file);
        log::debug!("Reading fixture {}", path.display());
        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BoothDataSource for FsDataSource {
    async fn fetch_master(&self) -> Result<RawMaster, SourceError> {
        self.read_json("master.json").await
    }

    async fn fetch_constituency(&self, data_file: &str) -> Result<RawConstituency, SourceError> {
        self.read_json(data_file).await
    }
}

/// Fetches fixture documents over HTTP from a base URL.
pub struct HttpDataSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataSource {
    /// Creates a source for the given base URL (trailing slash optional).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<T, SourceError> {
        let url = format!("{}/{file}", self.base_url);
        log::debug!("Fetching fixture {url}");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl BoothDataSource for HttpDataSource {
    async fn fetch_master(&self) -> Result<RawMaster, SourceError> {
        self.get_json("master.json").await
    }

    async fn fetch_constituency(&self, data_file: &str) -> Result<RawConstituency, SourceError> {
        self.get_json(data_file).await
    }
}
