//! `info` and `servers` built for an audience.

use utoipa::openapi::server::{ServerBuilder, ServerVariableBuilder};
use utoipa::openapi::{Info, InfoBuilder, Server};

use super::AudienceFilter;
use crate::Audience;

impl AudienceFilter {
    pub(super) fn info(&self, audience: Audience, version: Option<&str>) -> Info {
        let title = audience.title();
        let description = audience
            .policy()
            .description
            .map_or_else(|| title.clone(), str::to_string);

        InfoBuilder::new()
            .title(title)
            .version(version.unwrap_or(&self.config.default_version))
            .description(Some(description))
            .build()
    }

    pub(super) fn servers(&self, audience: Audience, version: Option<&str>) -> Vec<Server> {
        if !audience.policy().publishes_servers {
            return Vec::new();
        }

        let base_path = audience.prefix(version);
        let production = ServerBuilder::new()
            .url(&self.config.production_url)
            .description(Some("Production Server"))
            .parameter(
                "basePath",
                ServerVariableBuilder::new().default_value(&base_path),
            )
            .build();
        let development = ServerBuilder::new()
            .url(&self.config.development_url)
            .description(Some("Development Server"))
            .parameter(
                "basePath",
                ServerVariableBuilder::new().default_value(&base_path),
            )
            .parameter(
                "port",
                ServerVariableBuilder::new().default_value(&self.config.development_port),
            )
            .build();

        vec![production, development]
    }
}
