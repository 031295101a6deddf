//! Path classification, prefix stripping and operation visibility.

use tracing::trace;

use super::AudienceFilter;
use crate::{Addressing, Audience, AudiencePolicy, Operation, PathGuard, Paths, Visibility};

/// Strips the prefix of `audience` from `path`.
///
/// Every prefix listed in the audience policy is tried in order. Returns `None`
/// when the path lives outside the audience; a path equal to the prefix
/// becomes `/`.
///
/// # Example
///
/// ```rust
/// use oapi_scope_core::{Audience, mangle_path};
///
/// let path = "/api/notifications/v1.0/events";
/// assert_eq!(mangle_path(path, Audience::Notifications, Some("v1.0")).as_deref(), Some("/events"));
/// assert_eq!(mangle_path(path, Audience::Integrations, Some("v1.0")), None);
/// assert_eq!(mangle_path("/internal", Audience::Internal, None).as_deref(), Some("/"));
/// ```
#[must_use]
pub fn mangle_path(path: &str, audience: Audience, version: Option<&str>) -> Option<String> {
    audience
        .policy()
        .prefix_sources
        .iter()
        .find_map(|source| {
            path.strip_prefix(source.prefix(version).as_str())
                .map(str::to_string)
        })
        .map(|rest| if rest.is_empty() { "/".to_string() } else { rest })
}

impl AudienceFilter {
    pub(super) fn filter_paths(
        &self,
        paths: Paths,
        audience: Audience,
        version: Option<&str>,
    ) -> Paths {
        let policy = audience.policy();
        let mut result = Paths::new();

        for (path, item) in paths {
            if path.ends_with(&self.config.canonical_document_suffix) {
                trace!(%path, "skipping canonical document endpoint");
                continue;
            }

            let Some(mangled) = mangle_path(&path, audience, version) else {
                trace!(%path, %audience, "path outside audience");
                continue;
            };

            if !self.is_guarded(&path, audience, policy, version) {
                trace!(%path, %audience, "path rejected by guard");
                continue;
            }

            let Some(item) = item.retain_operations(|operation| {
                self.is_visible(operation, policy.visibility)
            }) else {
                trace!(%path, %audience, "no visible operation");
                continue;
            };

            let route = match policy.addressing {
                Addressing::Rewritten => mangled,
                Addressing::Original => path,
            };
            result.insert(route, item);
        }

        result
    }

    fn is_guarded(
        &self,
        path: &str,
        audience: Audience,
        policy: &AudiencePolicy,
        version: Option<&str>,
    ) -> bool {
        match policy.guard {
            PathGuard::None => true,
            PathGuard::OwnPrefix => path.starts_with(&audience.prefix(version)),
            PathGuard::InternalRoot => path.starts_with(&self.config.internal_root),
        }
    }

    fn is_visible(&self, operation: &Operation, visibility: Visibility) -> bool {
        let is_private = operation.has_tag(&self.config.private_tag);
        match visibility {
            Visibility::PublicOnly => !is_private,
            Visibility::PrivateOnly => is_private,
        }
    }
}
