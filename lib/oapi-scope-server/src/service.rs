//! The serving operation: fetch, filter, render.

use std::str::FromStr;
use std::sync::Arc;

use oapi_scope_core::{Audience, AudienceFilter, ToYaml};
use tracing::info;

use crate::errors::ServeError;
use crate::provider::DocumentProvider;

/// Format of a served document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `openapi.json`
    Json,
    /// `openapi.yaml`
    Yaml,
}

impl DocumentFormat {
    /// The `Content-Type` of documents in this format.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Yaml => "application/yaml",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = ServeError;

    fn from_str(file: &str) -> Result<Self, Self::Err> {
        match file {
            "openapi.json" => Ok(Self::Json),
            "openapi.yaml" | "openapi.yml" => Ok(Self::Yaml),
            _ => Err(ServeError::UnknownFormat {
                file: file.to_string(),
            }),
        }
    }
}

/// Serves audience views of the canonical document of a [`DocumentProvider`].
#[derive(Debug, Clone)]
pub struct DocumentService<P> {
    provider: P,
    filter: Arc<AudienceFilter>,
}

impl<P: DocumentProvider> DocumentService<P> {
    /// Creates a service filtering the documents of `provider` with `filter`.
    pub fn new(provider: P, filter: AudienceFilter) -> Self {
        Self {
            provider,
            filter: Arc::new(filter),
        }
    }

    /// Returns the view of the canonical document for `audience_name`, rendered in `format`.
    ///
    /// The audience is checked before the document is fetched.
    ///
    /// # Errors
    ///
    /// Fails if the audience is unknown, if the document cannot be fetched or
    /// filtered, or if no path is left for the audience.
    pub async fn serve(
        &self,
        audience_name: &str,
        version: Option<&str>,
        format: DocumentFormat,
    ) -> Result<String, ServeError> {
        let audience = audience_name.parse::<Audience>()?;

        let document = self.provider.fetch().await?;
        let view = self.filter.filter_value(document, audience, version)?;

        let body = match format {
            DocumentFormat::Json => view.to_json()?,
            DocumentFormat::Yaml => view.to_yaml()?,
        };
        info!(%audience, ?version, ?format, paths = view.paths.len(), "openapi document served");
        Ok(body)
    }
}
