#![allow(clippy::missing_errors_doc, dead_code, missing_docs)]
use std::net::SocketAddr;

use anyhow::Context;
use axum::http::StatusCode;
use oapi_scope_core::AudienceFilter;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};

use oapi_scope_server::{AppState, InMemoryDocumentProvider, launch};

/// A running server and a client to call it.
#[derive(Debug)]
pub struct TestApp {
    addr: SocketAddr,
    client: reqwest::Client,
    server: JoinHandle<()>,
}

/// Status, content type and body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> anyhow::Result<Value> {
        serde_json::from_str(&self.body).context("parsing response body")
    }
}

impl TestApp {
    pub async fn start(document: Value) -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("binding test listener")?;
        let addr = listener.local_addr().context("reading local address")?;
        info!(%addr, "launching server");

        let state = AppState::new(
            InMemoryDocumentProvider::new(document),
            AudienceFilter::default(),
        );
        let server = tokio::spawn(async move {
            if let Err(error) = launch(listener, state).await {
                error!(?error, "test server stopped");
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            server,
        })
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<TestResponse> {
        let response = self
            .client
            .get(format!("http://{}{path}", self.addr))
            .send()
            .await
            .with_context(|| format!("calling {path}"))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.context("reading response body")?;

        Ok(TestResponse {
            status,
            content_type,
            body,
        })
    }

    pub async fn openapi(&self, audience: &str, version: Option<&str>) -> anyhow::Result<TestResponse> {
        let path = match version {
            Some(version) => format!("/api/{audience}/{version}/openapi.json"),
            None => format!("/{audience}/openapi.json"),
        };
        self.get(&path).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}
