//! Sources of the canonical document.
//!
//! A provider returns the full, unfiltered document. It is called once per
//! request: every view is computed from a fresh snapshot.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

/// Errors raised while fetching the canonical document.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ProviderError {
    /// The upstream request failed or returned an error status.
    #[display("fetching canonical document: {_0}")]
    Http(reqwest::Error),

    /// The document file could not be read.
    #[display("reading canonical document: {_0}")]
    Io(std::io::Error),

    /// The document is not valid JSON.
    #[display("parsing canonical document: {_0}")]
    Json(serde_json::Error),
}

/// Returns the canonical document.
pub trait DocumentProvider: Clone + Send + Sync + 'static {
    /// Fetches a fresh snapshot of the canonical document.
    fn fetch(&self) -> impl Future<Output = Result<Value, ProviderError>> + Send;
}

/// Fetches the canonical document from the backend serving it.
#[derive(Debug, Clone)]
pub struct HttpDocumentProvider {
    client: reqwest::Client,
    url: Url,
}

impl HttpDocumentProvider {
    /// Default location of the canonical document.
    pub const DEFAULT_URL: &'static str = "http://localhost:8085/openapi.json";

    /// Creates a provider fetching `url`.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// The fetched URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl DocumentProvider for HttpDocumentProvider {
    async fn fetch(&self) -> Result<Value, ProviderError> {
        debug!(url = %self.url, "fetching canonical document");
        let document = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(document)
    }
}

/// Reads the canonical document from a JSON file, on every fetch.
#[derive(Debug, Clone)]
pub struct FileDocumentProvider {
    path: Arc<PathBuf>,
}

impl FileDocumentProvider {
    /// Creates a provider reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }
}

impl DocumentProvider for FileDocumentProvider {
    async fn fetch(&self) -> Result<Value, ProviderError> {
        debug!(path = %self.path.display(), "reading canonical document");
        let content = tokio::fs::read(self.path.as_path()).await?;
        let document = serde_json::from_slice(&content)?;
        Ok(document)
    }
}

/// Hands out copies of a document held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentProvider {
    document: Arc<Value>,
}

impl InMemoryDocumentProvider {
    /// Creates a provider returning copies of `document`.
    #[must_use]
    pub fn new(document: Value) -> Self {
        Self {
            document: Arc::new(document),
        }
    }
}

impl DocumentProvider for InMemoryDocumentProvider {
    async fn fetch(&self) -> Result<Value, ProviderError> {
        Ok(Value::clone(&self.document))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn should_hand_out_independent_snapshots() {
        let provider = InMemoryDocumentProvider::new(json!({ "openapi": "3.0.3" }));

        let mut first = provider.fetch().await.expect("snapshot");
        first["openapi"] = json!("3.1.0");
        let second = provider.fetch().await.expect("snapshot");

        assert_eq!(second, json!({ "openapi": "3.0.3" }));
    }

    #[tokio::test]
    async fn should_report_missing_file() {
        let provider = FileDocumentProvider::new("does/not/exist/openapi.json");

        let error = provider.fetch().await.expect_err("missing file");

        assert!(matches!(error, ProviderError::Io(_)));
        assert!(error.to_string().starts_with("reading canonical document"));
    }

    #[test]
    fn should_parse_default_upstream() {
        let url = Url::parse(HttpDocumentProvider::DEFAULT_URL).expect("valid url");
        let provider = HttpDocumentProvider::new(url);

        assert_eq!(provider.url().path(), "/openapi.json");
    }
}
