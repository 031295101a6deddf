use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use oapi_scope_core::{FilterError, YamlError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::provider::ProviderError;

/// Errors raised while serving an audience view.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ServeError {
    /// The view cannot be built.
    Filter(FilterError),

    /// The canonical document cannot be fetched.
    Provider(ProviderError),

    /// The requested file is not a known document format.
    #[from(skip)]
    #[display("No openapi file named [{file}]")]
    UnknownFormat {
        /// The rejected file name.
        file: String,
    },

    /// The view cannot be rendered as JSON.
    Json(serde_json::Error),

    /// The view cannot be rendered as YAML.
    Yaml(YamlError),
}

impl ServeError {
    /// The HTTP status reported for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Filter(error) if error.is_not_found() => StatusCode::NOT_FOUND,
            Self::UnknownFormat { .. } => StatusCode::NOT_FOUND,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Filter(_) | Self::Json(_) | Self::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response returned for all error cases
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for ServeError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "cannot serve openapi document");
        } else {
            debug!(error = %self, %status, "no openapi document");
        }

        let message = self.to_string();
        let error_response = ApiErrorResponse { message };

        (status, Json(error_response)).into_response()
    }
}
