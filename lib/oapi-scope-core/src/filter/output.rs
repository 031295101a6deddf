//! The filtered document and the extension trait producing it.

use serde::Serialize;
use serde_json::Value;
use utoipa::openapi::{Info, Server};

use super::AudienceFilter;
use crate::{Audience, Document, FilterError, Paths, Tag};

/// The view of a canonical document for one audience.
///
/// It is a complete document: it serializes with the same top-level keys as its
/// source, `info` and `servers` being rebuilt for the audience. `paths` is never
/// empty.
///
/// # Example
///
/// ```rust
/// use oapi_scope_core::{Audience, AudienceFilter, Document};
/// use serde_json::json;
///
/// let document = Document::try_from(json!({
///     "openapi": "3.0.3",
///     "paths": { "/internal/status": { "get": {} } }
/// }))?;
///
/// let view = AudienceFilter::default().filter(&document, Audience::Internal, None)?;
/// let json: serde_json::Value = serde_json::from_str(&view.to_json()?)?;
///
/// assert_eq!(json["info"]["title"], "Internal");
/// assert_eq!(json["servers"], json!([]));
/// assert_eq!(json["paths"], json!({ "/status": { "get": {} } }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FilteredDocument {
    /// The `openapi` version, copied from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<Value>,

    /// Document metadata built for the audience.
    pub info: Info,

    /// Servers advertised to the audience.
    pub servers: Vec<Server>,

    /// Public tags of the source, absent when none remains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    /// Paths visible to the audience.
    pub paths: Paths,

    /// The `components`, copied from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Value>,
}

impl FilteredDocument {
    pub(super) fn new(info: Info, servers: Vec<Server>) -> Self {
        Self {
            openapi: None,
            info,
            servers,
            tags: None,
            paths: Paths::new(),
            components: None,
        }
    }

    /// Total number of operations over all paths.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths
            .values()
            .map(|item| item.operations().count())
            .sum()
    }

    /// Serializes the document to compact JSON.
    ///
    /// # Errors
    ///
    /// Fails if a copied section cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Extension trait for convenient filtering of a [`Document`].
pub trait DocumentFilterExt {
    /// Builds the view of this document for `audience`.
    ///
    /// This is a convenience method that calls `filter.filter(self, audience, version)`.
    ///
    /// # Errors
    ///
    /// See [`AudienceFilter::filter`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use oapi_scope_core::{Audience, AudienceFilter, Document, DocumentFilterExt};
    /// use serde_json::json;
    ///
    /// let document = Document::try_from(json!({
    ///     "paths": { "/api/notifications/v1.0/events": { "get": {} } }
    /// }))?;
    ///
    /// let view = document.view_for(&AudienceFilter::default(), Audience::Notifications, Some("v1.0"))?;
    /// assert_eq!(view.operation_count(), 1);
    /// # Ok::<(), oapi_scope_core::FilterError>(())
    /// ```
    fn view_for(
        &self,
        filter: &AudienceFilter,
        audience: Audience,
        version: Option<&str>,
    ) -> Result<FilteredDocument, FilterError>;
}

impl DocumentFilterExt for Document {
    fn view_for(
        &self,
        filter: &AudienceFilter,
        audience: Audience,
        version: Option<&str>,
    ) -> Result<FilteredDocument, FilterError> {
        filter.filter(self, audience, version)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use utoipa::openapi::InfoBuilder;

    use super::*;
    use crate::{Operation, PathItem};

    #[test]
    fn should_serialize_keys_in_document_order() {
        let mut document = FilteredDocument::new(
            InfoBuilder::new().title("Internal").version("v1.0").build(),
            Vec::new(),
        );
        document.openapi = Some(json!("3.0.3"));
        document.components = Some(json!({}));
        document.tags = Some(vec![Tag::new("internal")]);
        document.paths.insert(
            "/status".to_string(),
            PathItem::new().with_operation("get", Operation::default()),
        );

        let json = serde_json::to_value(&document).expect("serializable");
        let keys = json
            .as_object()
            .map(|object| object.keys().map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default();

        assert_eq!(
            keys,
            vec!["openapi", "info", "servers", "tags", "paths", "components"]
        );
    }

    #[test]
    fn should_count_operations_of_all_paths() {
        let mut document = FilteredDocument::new(Info::default(), Vec::new());
        document.paths.insert(
            "/events".to_string(),
            PathItem::new()
                .with_shared("summary", json!("Events"))
                .with_operation("get", Operation::default())
                .with_operation("delete", Operation::default()),
        );
        document.paths.insert(
            "/".to_string(),
            PathItem::new().with_operation("get", Operation::default()),
        );

        assert_eq!(document.operation_count(), 3);
    }

    #[test]
    fn should_view_through_extension_trait() {
        let document = Document::try_from(json!({
            "paths": {
                "/api/integrations/v1.0/webhooks": {
                    "get": { "tags": ["integrations"] }
                }
            }
        }))
        .expect("valid document");

        let view = document
            .view_for(&AudienceFilter::default(), Audience::Integrations, Some("v1.0"))
            .expect("integrations view");

        assert!(view.paths["/webhooks"].operation("get").is_some());
    }
}
