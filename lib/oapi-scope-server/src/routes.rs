use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;
use crate::errors::ServeError;
use crate::provider::DocumentProvider;
use crate::service::DocumentFormat;

/// The application router
pub fn app_router<P: DocumentProvider>() -> Router<AppState<P>> {
    Router::new()
        .route(
            "/api/{audience}/{version}/{file}",
            get(versioned_document::<P>),
        )
        .route("/{audience}/{file}", get(unversioned_document::<P>))
        .route("/health", get(health::<P>))
}

async fn versioned_document<P: DocumentProvider>(
    State(state): State<AppState<P>>,
    Path((audience, version, file)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ServeError> {
    let format = file.parse::<DocumentFormat>()?;
    let body = state
        .service()
        .serve(&audience, Some(&version), format)
        .await?;

    Ok(([(CONTENT_TYPE, format.content_type())], body))
}

async fn unversioned_document<P: DocumentProvider>(
    State(state): State<AppState<P>>,
    Path((audience, file)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServeError> {
    let format = file.parse::<DocumentFormat>()?;
    let body = state.service().serve(&audience, None, format).await?;

    Ok(([(CONTENT_TYPE, format.content_type())], body))
}

async fn health<P: DocumentProvider>(State(state): State<AppState<P>>) -> impl IntoResponse {
    let uptime = state.uptime();

    Json(json!({
        "status": "OK",
        "uptime": uptime,
    }))
}
