//! The audiences a canonical document can be filtered for, and their policies.

use std::fmt;
use std::str::FromStr;

use crate::FilterError;

const NOTIFICATIONS_DESCRIPTION: &str = "The API for Notifications provides endpoints that you can use to create and manage event notifications between third-party applications and the Red Hat Hybrid Cloud Console.";
const INTEGRATIONS_DESCRIPTION: &str = "The API for Integrations provides endpoints that you can use to create and manage integrations between third-party applications and the Red Hat Hybrid Cloud Console.";

/// A consumer-facing view of the canonical document.
///
/// # Example
///
/// ```rust
/// use oapi_scope_core::Audience;
///
/// let audience: Audience = "integrations".parse()?;
/// assert_eq!(audience, Audience::Integrations);
/// assert_eq!(audience.prefix(Some("v1.0")), "/api/integrations/v1.0");
/// assert_eq!(Audience::Internal.prefix(None), "/internal");
/// # Ok::<(), oapi_scope_core::FilterError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Public notifications API.
    Notifications,
    /// Public integrations API.
    Integrations,
    /// Operations tagged `private` inside the public APIs.
    Private,
    /// Service-to-service endpoints.
    Internal,
}

impl Audience {
    /// All audiences, in the order they are advertised.
    pub const ALL: [Self; 4] = [
        Self::Integrations,
        Self::Notifications,
        Self::Private,
        Self::Internal,
    ];

    /// The lowercase name used in URLs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Integrations => "integrations",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }

    /// The name with a leading capital, used as document title.
    #[must_use]
    pub fn title(self) -> String {
        capitalize(self.name())
    }

    /// The path prefix of this audience.
    ///
    /// `/api/<audience>/<version>` for versioned APIs, `/<audience>` otherwise.
    #[must_use]
    pub fn prefix(self, version: Option<&str>) -> String {
        match version {
            Some(version) => format!("/api/{}/{version}", self.name()),
            None => format!("/{}", self.name()),
        }
    }

    /// The filtering policy of this audience.
    #[must_use]
    pub fn policy(self) -> &'static AudiencePolicy {
        match self {
            Self::Notifications => &NOTIFICATIONS_POLICY,
            Self::Integrations => &INTEGRATIONS_POLICY,
            Self::Private => &PRIVATE_POLICY,
            Self::Internal => &INTERNAL_POLICY,
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Audience {
    type Err = FilterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|audience| audience.name() == name)
            .ok_or_else(|| FilterError::UnknownAudience {
                name: name.to_string(),
            })
    }
}

/// Where a retained path item is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Under the path with the audience prefix stripped.
    Rewritten,
    /// Under the original, full path.
    Original,
}

/// Which operations of a path item survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Operations not tagged `private`.
    PublicOnly,
    /// Operations tagged `private`.
    PrivateOnly,
}

/// Extra condition on the original path, checked after prefix matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathGuard {
    /// No extra condition.
    None,
    /// The path must start with the audience's own prefix.
    OwnPrefix,
    /// The path must start with the internal API root.
    InternalRoot,
}

/// The filtering policy of one [`Audience`].
///
/// The policies are plain data: adding a public audience that private operations
/// may live in only means adding it to the private policy's `prefix_sources`.
#[derive(Debug)]
pub struct AudiencePolicy {
    /// Audiences whose prefixes are tried, in order, to match a path.
    pub prefix_sources: &'static [Audience],
    /// Where retained path items are emitted.
    pub addressing: Addressing,
    /// Which operations are retained.
    pub visibility: Visibility,
    /// Extra condition on the original path.
    pub guard: PathGuard,
    /// Fixed `info.description`, the audience title is used when absent.
    pub description: Option<&'static str>,
    /// Whether production and development servers are advertised.
    pub publishes_servers: bool,
}

static NOTIFICATIONS_POLICY: AudiencePolicy = AudiencePolicy {
    prefix_sources: &[Audience::Notifications],
    addressing: Addressing::Rewritten,
    visibility: Visibility::PublicOnly,
    guard: PathGuard::OwnPrefix,
    description: Some(NOTIFICATIONS_DESCRIPTION),
    publishes_servers: true,
};

static INTEGRATIONS_POLICY: AudiencePolicy = AudiencePolicy {
    prefix_sources: &[Audience::Integrations],
    addressing: Addressing::Rewritten,
    visibility: Visibility::PublicOnly,
    guard: PathGuard::OwnPrefix,
    description: Some(INTEGRATIONS_DESCRIPTION),
    publishes_servers: true,
};

// Private operations are hidden operations of the public APIs.
static PRIVATE_POLICY: AudiencePolicy = AudiencePolicy {
    prefix_sources: &[Audience::Integrations, Audience::Notifications],
    addressing: Addressing::Original,
    visibility: Visibility::PrivateOnly,
    guard: PathGuard::None,
    description: None,
    publishes_servers: false,
};

static INTERNAL_POLICY: AudiencePolicy = AudiencePolicy {
    prefix_sources: &[Audience::Internal],
    addressing: Addressing::Rewritten,
    visibility: Visibility::PublicOnly,
    guard: PathGuard::InternalRoot,
    description: None,
    publishes_servers: false,
};

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
