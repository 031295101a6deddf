//! Error types for document parsing and audience filtering.

use crate::Audience;

/// Errors raised while turning a canonical document into an audience view.
///
/// Every variant aborts the whole filtering pass: there is no partial output.
///
/// # Error Categories
///
/// - **User-facing**: [`UnknownAudience`](Self::UnknownAudience) and
///   [`EmptyResult`](Self::EmptyResult) mean "nothing to show" and map to a not-found response.
/// - **Internal defects**: [`UnknownDocumentElement`](Self::UnknownDocumentElement),
///   [`MalformedSection`](Self::MalformedSection) and [`NotAnObject`](Self::NotAnObject)
///   mean the canonical document no longer matches what the filter understands.
///   Retrying cannot fix them.
///
/// # Example
///
/// ```rust
/// use oapi_scope_core::{Audience, FilterError};
///
/// let error = "public".parse::<Audience>().expect_err("not an audience");
/// assert!(matches!(error, FilterError::UnknownAudience { .. }));
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum FilterError {
    /// The requested audience is not one of the known variants.
    #[display("No openapi file for [{name}] found")]
    UnknownAudience {
        /// The rejected audience name.
        name: String,
    },

    /// No path of the canonical document matches the audience and version.
    #[display(
        "No {audience} operation found for version {}",
        version.as_deref().unwrap_or("<unversioned>")
    )]
    EmptyResult {
        /// The audience being computed.
        audience: Audience,
        /// The requested version, if any.
        version: Option<String>,
    },

    /// The canonical document has a top-level element the filter does not handle.
    #[display("Unknown OpenAPI top-level element {key}")]
    UnknownDocumentElement {
        /// The unexpected top-level key.
        key: String,
    },

    /// A known top-level section does not have the expected shape.
    #[display("Malformed OpenAPI section '{section}': {source}")]
    MalformedSection {
        /// The top-level key of the section.
        section: &'static str,
        /// The underlying error, with the JSON path of the offending element.
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    /// The canonical document root is not a JSON object.
    #[display("OpenAPI document root must be an object")]
    NotAnObject,
}

impl FilterError {
    /// Returns `true` when the error means "nothing to show" rather than a defect.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownAudience { .. } | Self::EmptyResult { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_empty_result_with_version() {
        let error = FilterError::EmptyResult {
            audience: Audience::Integrations,
            version: Some("v2.0".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "No integrations operation found for version v2.0"
        );
    }

    #[test]
    fn should_display_empty_result_without_version() {
        let error = FilterError::EmptyResult {
            audience: Audience::Internal,
            version: None,
        };

        assert_eq!(
            error.to_string(),
            "No internal operation found for version <unversioned>"
        );
    }

    #[test]
    fn should_not_treat_document_defects_as_not_found() {
        let error = FilterError::UnknownDocumentElement {
            key: "webhooks".to_string(),
        };

        assert!(!error.is_not_found());
        assert_eq!(error.to_string(), "Unknown OpenAPI top-level element webhooks");
    }
}
