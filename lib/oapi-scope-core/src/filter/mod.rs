//! Audience filtering of a canonical OpenAPI document.
//!
//! This module turns the single, fully generated document of a backend into the
//! view a given [`Audience`] is allowed to see.
//!
//! # Overview
//!
//! For every request, [`AudienceFilter::filter`]:
//! - copies `openapi` and `components` as is
//! - drops the `private` entry from `tags`
//! - keeps the paths living under the audience prefix, strips that prefix, and
//!   keeps only the operations visible to the audience
//! - empties the roles of the generated role-based security scheme
//! - rebuilds `info` and `servers` for the audience
//!
//! # Example
//!
//! ```rust
//! use oapi_scope_core::{Audience, AudienceFilter, Document};
//! use serde_json::json;
//!
//! let document = Document::try_from(json!({
//!     "openapi": "3.0.3",
//!     "paths": {
//!         "/api/integrations/v1.0/webhooks": {
//!             "get": { "tags": ["integrations"] }
//!         }
//!     }
//! }))?;
//!
//! let filter = AudienceFilter::default();
//! let view = filter.filter(&document, Audience::Integrations, Some("v1.0"))?;
//!
//! assert!(view.paths.contains_key("/webhooks"));
//! assert_eq!(view.info.title, "Integrations");
//! assert_eq!(view.servers.len(), 2);
//! # Ok::<(), oapi_scope_core::FilterError>(())
//! ```

use serde_json::Value;
use tracing::debug;

use crate::{Audience, Document, FilterError, Section, Tag};

mod output;
mod paths;
mod security;
mod synthesis;

pub use self::output::{DocumentFilterExt, FilteredDocument};
pub use self::paths::mangle_path;

/// Settings of an [`AudienceFilter`].
///
/// The defaults match the documents generated by the notifications backend.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    security_scheme_name: String,
    default_version: String,
    private_tag: String,
    internal_root: String,
    canonical_document_suffix: String,
    production_url: String,
    development_url: String,
    development_port: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            security_scheme_name: "SecurityScheme".to_string(),
            default_version: "v1.0".to_string(),
            private_tag: "private".to_string(),
            internal_root: "/internal".to_string(),
            canonical_document_suffix: "openapi.json".to_string(),
            production_url: "https://console.redhat.com/{basePath}".to_string(),
            development_url: "http://localhost:{port}/{basePath}".to_string(),
            development_port: "8080".to_string(),
        }
    }
}

impl FilterConfig {
    /// Name of the generated role-based security scheme whose roles are removed.
    #[must_use]
    pub fn security_scheme_name(&self) -> &str {
        &self.security_scheme_name
    }

    /// `info.version` used when no version is requested.
    #[must_use]
    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Tag marking operations hidden from the public views.
    #[must_use]
    pub fn private_tag(&self) -> &str {
        &self.private_tag
    }
}

/// Produces audience-specific views of a canonical document.
///
/// The filter holds no state besides its configuration: it can be shared
/// and called concurrently.
#[derive(Debug, Clone, Default)]
pub struct AudienceFilter {
    config: FilterConfig,
}

impl AudienceFilter {
    /// Creates a builder to customize the filter settings.
    #[must_use]
    pub fn builder() -> AudienceFilterBuilder {
        AudienceFilterBuilder::default()
    }

    /// The filter settings.
    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Builds the view of `document` for `audience`.
    ///
    /// `version` selects `/api/<audience>/<version>` paths; without it, paths
    /// under `/<audience>` are used.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyResult`] when no path is left for the audience.
    pub fn filter(
        &self,
        document: &Document,
        audience: Audience,
        version: Option<&str>,
    ) -> Result<FilteredDocument, FilterError> {
        let document = document.sanitize_security(&self.config.security_scheme_name);

        let mut result = FilteredDocument::new(
            self.info(audience, version),
            self.servers(audience, version),
        );

        for section in document.into_sections() {
            match section {
                Section::OpenApi(value) => result.openapi = Some(value),
                Section::Components(value) => result.components = Some(value),
                Section::Tags(tags) => result.tags = self.public_tags(tags),
                Section::Paths(paths) => result.paths = self.filter_paths(paths, audience, version),
                // rebuilt from the audience
                Section::Info(_) | Section::Servers(_) => {}
            }
        }

        if result.paths.is_empty() {
            debug!(%audience, ?version, "no path left after filtering");
            return Err(FilterError::EmptyResult {
                audience,
                version: version.map(str::to_string),
            });
        }

        debug!(
            %audience,
            ?version,
            paths = result.paths.len(),
            operations = result.operation_count(),
            "document filtered"
        );
        Ok(result)
    }

    /// Parses a raw canonical document, then builds the view of `audience`.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be parsed (see [`Document::try_from`]) or if
    /// no path is left for the audience.
    pub fn filter_value(
        &self,
        document: Value,
        audience: Audience,
        version: Option<&str>,
    ) -> Result<FilteredDocument, FilterError> {
        let document = Document::try_from(document)?;
        self.filter(&document, audience, version)
    }

    fn public_tags(&self, tags: Vec<Tag>) -> Option<Vec<Tag>> {
        let tags = tags
            .into_iter()
            .filter(|tag| tag.name != self.config.private_tag)
            .collect::<Vec<_>>();
        (!tags.is_empty()).then_some(tags)
    }
}

/// Builder for [`AudienceFilter`].
///
/// # Example
///
/// ```rust
/// use oapi_scope_core::AudienceFilter;
///
/// let filter = AudienceFilter::builder()
///     .with_security_scheme_name("BasicAuth")
///     .with_development_port(8085)
///     .build();
///
/// assert_eq!(filter.config().security_scheme_name(), "BasicAuth");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AudienceFilterBuilder {
    config: FilterConfig,
}

impl AudienceFilterBuilder {
    /// Sets the security scheme whose roles are removed from every operation.
    #[must_use]
    pub fn with_security_scheme_name(mut self, name: impl Into<String>) -> Self {
        self.config.security_scheme_name = name.into();
        self
    }

    /// Sets the `info.version` used when no version is requested.
    #[must_use]
    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.config.default_version = version.into();
        self
    }

    /// Sets the tag marking private operations.
    #[must_use]
    pub fn with_private_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.private_tag = tag.into();
        self
    }

    /// Sets the root every internal path starts with.
    #[must_use]
    pub fn with_internal_root(mut self, root: impl Into<String>) -> Self {
        self.config.internal_root = root.into();
        self
    }

    /// Sets the suffix of the path serving the canonical document itself.
    #[must_use]
    pub fn with_canonical_document_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.canonical_document_suffix = suffix.into();
        self
    }

    /// Sets the production server URL template, it must use `{basePath}`.
    #[must_use]
    pub fn with_production_url(mut self, url: impl Into<String>) -> Self {
        self.config.production_url = url.into();
        self
    }

    /// Sets the development server URL template, it must use `{port}` and `{basePath}`.
    #[must_use]
    pub fn with_development_url(mut self, url: impl Into<String>) -> Self {
        self.config.development_url = url.into();
        self
    }

    /// Sets the default `port` variable of the development server.
    #[must_use]
    pub fn with_development_port(mut self, port: u16) -> Self {
        self.config.development_port = port.to_string();
        self
    }

    /// Builds the filter.
    #[must_use]
    pub fn build(self) -> AudienceFilter {
        AudienceFilter {
            config: self.config,
        }
    }
}
