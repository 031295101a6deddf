//! # oapi-scope core
//!
//! Split a single, fully generated OpenAPI document into audience-specific views.
//!
//! A backend introspects all its REST endpoints into one canonical document. This
//! crate derives, on demand, the document each [`Audience`] may see:
//! - **notifications** and **integrations**: the public APIs, with their
//!   `/api/<audience>/<version>` prefix stripped from every path
//! - **private**: the operations tagged `private` inside the public APIs, under
//!   their original paths
//! - **internal**: the service-to-service endpoints living under `/internal`
//!
//! ## Quick Start
//!
//! ```rust
//! use oapi_scope_core::{Audience, AudienceFilter, Document};
//! use serde_json::json;
//!
//! let document = Document::try_from(json!({
//!     "openapi": "3.0.3",
//!     "tags": [{ "name": "integrations" }, { "name": "private" }],
//!     "paths": {
//!         "/api/integrations/v1.0/webhooks": {
//!             "get": { "tags": ["integrations"] },
//!             "delete": { "tags": ["integrations", "private"] }
//!         }
//!     },
//!     "components": {}
//! }))?;
//!
//! let filter = AudienceFilter::default();
//!
//! let public = filter.filter(&document, Audience::Integrations, Some("v1.0"))?;
//! assert!(public.paths["/webhooks"].operation("delete").is_none());
//!
//! let private = filter.filter(&document, Audience::Private, Some("v1.0"))?;
//! assert!(private.paths["/api/integrations/v1.0/webhooks"].operation("delete").is_some());
//! # Ok::<(), oapi_scope_core::FilterError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`FilterError`]. Use [`FilterError::is_not_found`] to tell
//! "nothing to show" from a canonical document the filter cannot handle.
//!
//! ## Features
//!
//! - `yaml`: render views as YAML with [`ToYaml`].

mod audience;
mod document;
mod error;
mod filter;

#[cfg(feature = "yaml")]
mod yaml;

pub use self::audience::{Addressing, Audience, AudiencePolicy, PathGuard, Visibility};
pub use self::document::{
    Document, Operation, PathItem, PathItemEntry, Paths, Section, SecurityRequirement, Tag,
};
pub use self::error::FilterError;
pub use self::filter::{
    AudienceFilter, AudienceFilterBuilder, DocumentFilterExt, FilterConfig, FilteredDocument,
    mangle_path,
};

#[cfg(feature = "yaml")]
pub use self::yaml::{ToYaml, YamlError};
