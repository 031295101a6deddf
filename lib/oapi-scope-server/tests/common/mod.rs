#![allow(dead_code, missing_docs, clippy::expect_used)]
use anyhow::Context;
use rstest::fixture;
use serde_json::Value;
use tracing::info;

mod test_app;
pub use self::test_app::*;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

pub fn canonical_document() -> Value {
    serde_json::from_str(include_str!("../fixtures/openapi.json"))
        .context("parsing canonical document fixture")
        .expect("valid fixture")
}

#[fixture]
pub async fn app() -> TestApp {
    init_tracing();
    match TestApp::start(canonical_document()).await {
        Ok(app) => app,
        Err(error) => {
            panic!("fail to start test app: {error:?}");
        }
    }
}
