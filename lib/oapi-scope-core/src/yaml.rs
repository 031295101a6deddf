//! YAML rendering of audience views.
//!
//! Served next to the JSON rendering under `openapi.yaml`. Enabled by the
//! `yaml` feature.
//!
//! # Example
//!
//! ```rust
//! use oapi_scope_core::{Audience, AudienceFilter, Document, ToYaml};
//! use serde_json::json;
//!
//! let document = Document::try_from(json!({
//!     "paths": { "/internal/status": { "get": { "operationId": "getStatus" } } }
//! }))?;
//! let view = AudienceFilter::default().filter(&document, Audience::Internal, None)?;
//!
//! let yaml = view.to_yaml()?;
//! assert!(yaml.contains("operationId: getStatus"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

/// Failure to render a view as YAML.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Renders a [`FilteredDocument`](crate::FilteredDocument), or any other
/// serializable part of a view, as a YAML document.
pub trait ToYaml: Serialize + Sized {
    /// Renders this value as YAML, fields in serialization order.
    ///
    /// # Errors
    ///
    /// Fails when a copied section holds a value YAML cannot represent.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize> ToYaml for T {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Audience, AudienceFilter, Document};

    #[test]
    fn should_render_view_as_yaml() {
        let document = Document::try_from(json!({
            "openapi": "3.0.3",
            "paths": {
                "/internal/status": {
                    "get": { "operationId": "getStatus" }
                }
            }
        }))
        .expect("valid document");
        let view = AudienceFilter::default()
            .filter(&document, Audience::Internal, None)
            .expect("internal view");

        let yaml = view.to_yaml().expect("should serialize to YAML");

        assert!(yaml.contains("openapi:"));
        assert!(yaml.contains("title: Internal"));
        assert!(yaml.contains("/status"));
        assert!(yaml.contains("operationId: getStatus"));
    }

    #[test]
    fn should_keep_templated_server_urls() {
        let document = Document::try_from(json!({
            "paths": { "/api/notifications/v1.0/events": { "get": {} } }
        }))
        .expect("valid document");
        let view = AudienceFilter::default()
            .filter(&document, Audience::Notifications, Some("v1.0"))
            .expect("notifications view");

        let yaml = view.to_yaml().expect("should serialize to YAML");

        assert!(yaml.contains("{basePath}"));
        assert!(yaml.contains("/api/notifications/v1.0"));
    }
}
