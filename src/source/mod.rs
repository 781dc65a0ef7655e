//! Transports that deliver manifest bytes to the resolver.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

const USER_AGENT: &str = concat!("cloud-image-catalog/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Raw manifest bytes; no caching, no verification.
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    /// Where the bytes come from, for messages.
    fn location(&self) -> String;
}

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("GET {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Manifest served over HTTP(S).
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let url = url.into();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;

        Ok(Self { url, client })
    }
}

#[async_trait]
impl ManifestSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let http_err = |source| SourceError::Http {
            url: self.url.clone(),
            source,
        };

        debug!(url = %self.url, "fetching manifest");
        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(http_err)?
            .bytes()
            .await
            .map_err(http_err)?;

        debug!(url = %self.url, bytes = bytes.len(), "manifest downloaded");
        Ok(bytes.to_vec())
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Manifest stored on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ManifestSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        debug!(path = %self.path.display(), "reading manifest");
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
