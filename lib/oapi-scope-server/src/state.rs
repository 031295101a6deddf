use std::time::{Duration, Instant};

use oapi_scope_core::AudienceFilter;

use crate::provider::DocumentProvider;
use crate::service::DocumentService;

/// The application state
#[derive(Debug, Clone)]
pub struct AppState<P> {
    started_at: Instant,
    service: DocumentService<P>,
}

impl<P: DocumentProvider> AppState<P> {
    /// Create a state serving the documents of `provider`
    pub fn new(provider: P, filter: AudienceFilter) -> Self {
        let started_at = Instant::now();
        let service = DocumentService::new(provider, filter);

        Self {
            started_at,
            service,
        }
    }

    pub(crate) fn service(&self) -> &DocumentService<P> {
        &self.service
    }

    pub(crate) fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
