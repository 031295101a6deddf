//! # oapi-scope server
//!
//! Serves the audience views of a canonical OpenAPI document over HTTP:
//!
//! - `GET /api/{audience}/{version}/openapi.json` (or `openapi.yaml`)
//! - `GET /{audience}/openapi.json` (or `openapi.yaml`) for unversioned audiences
//! - `GET /health`
//!
//! The canonical document is fetched from a [`DocumentProvider`] on every request.
//! Unknown audiences and views without any path answer `404 Not Found`.
use std::net::SocketAddr;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::info;

mod errors;
mod provider;
mod routes;
mod service;
mod state;

pub use self::errors::{ApiErrorResponse, ServeError};
pub use self::provider::{
    DocumentProvider, FileDocumentProvider, HttpDocumentProvider, InMemoryDocumentProvider,
    ProviderError,
};
pub use self::routes::app_router;
pub use self::service::{DocumentFormat, DocumentService};
pub use self::state::AppState;

/// Launch the server
///
/// # Errors
///
/// fail if the socket cannot be created (e.g. port already used)
/// fail if the server cannot be launch
pub async fn run<P: DocumentProvider>(addr: SocketAddr, state: AppState<P>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("opening {addr}"))?;
    info!("Using address {addr}");

    launch(listener, state).await
}

/// Launch the server
///
/// # Errors
///
/// fail if the server cannot be launch
pub async fn launch<P: DocumentProvider>(
    listener: tokio::net::TcpListener,
    state: AppState<P>,
) -> anyhow::Result<()> {
    let app = app_router::<P>()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    axum::serve(listener, app.into_make_service())
        .await
        .context("starting server")?;

    Ok(())
}
