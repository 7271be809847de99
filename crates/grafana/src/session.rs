//! Session context: base URL, authorization header and organization scope.
//!
//! A [`Session`] is built once per invocation and shared by every request
//! of that invocation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Default Grafana URL.
pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Default organization id used with basic auth.
pub const DEFAULT_ORG_ID: i64 = 1;

/// Credentials used to authenticate against Grafana.
///
/// An API key (service account token) and a username/password pair are
/// mutually exclusive. Only basic auth is organization scoped.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Bearer token.
    ApiKey(String),
    /// HTTP basic auth.
    Basic {
        /// Login name.
        user: String,
        /// Password.
        password: String,
    },
}

impl Credentials {
    /// Create basic auth credentials.
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Create bearer token credentials.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Whether organization switching applies to these credentials.
    #[must_use]
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic { .. })
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        match self {
            Self::ApiKey(key) => format!("Bearer {key}"),
            Self::Basic { user, password } => {
                format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Which organization a basic auth session should act in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgSelector {
    /// Organization by numeric id.
    Id(i64),
    /// Organization by exact name, resolved through the user's memberships.
    Name(String),
}

impl Default for OrgSelector {
    fn default() -> Self {
        Self::Id(DEFAULT_ORG_ID)
    }
}

/// Authenticated connection state for one invocation.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    authorization: String,
    org_id: Option<i64>,
}

impl Session {
    /// Create a session for `url`; the URL is normalized.
    pub fn new(url: &str, credentials: &Credentials) -> Self {
        Self {
            base_url: normalize_url(url),
            authorization: credentials.authorization(),
            org_id: None,
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Active organization, set once switching succeeded (basic auth only).
    #[must_use]
    pub fn org_id(&self) -> Option<i64> {
        self.org_id
    }

    pub(crate) fn set_org_id(&mut self, org_id: i64) {
        self.org_id = Some(org_id);
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("authorization", &"***")
            .field("org_id", &self.org_id)
            .finish()
    }
}

/// Strip surrounding whitespace and trailing slashes from a base URL.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
