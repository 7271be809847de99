//! # grafana
//!
//! Declarative management of Grafana alerting contact points.
//!
//! This crate provides functionality for:
//! - Converging one contact point to a declared state (create, update, delete)
//! - Selecting the organization scope of basic auth sessions
//! - Building provisioning API payloads from typed declarations
//! - An in-memory [`MockTransport`] for testing without a server
//!
//! ## Example
//!
//! ```
//! use grafana::{Client, ContactPoint, ContactPointKind, Credentials, MockTransport, OrgSelector};
//!
//! let mock = MockTransport::new();
//! mock.add_org(1, "Main Org.");
//!
//! let client = Client::with_transport(
//!     Box::new(mock.clone()),
//!     "http://localhost:3000",
//!     &Credentials::basic("admin", "admin"),
//!     &OrgSelector::default(),
//! )
//! .unwrap();
//!
//! let cp = ContactPoint::new("email", "E-Mail", ContactPointKind::email(["example@example.com"]));
//! let outcome = client.apply(&cp.clone().into()).unwrap();
//! assert!(outcome.changed);
//!
//! // Converged: running again changes nothing
//! assert!(!client.apply(&cp.into()).unwrap().changed);
//! ```
//!
//! ## Status codes
//!
//! | Request                   | Success    |
//! |---------------------------|------------|
//! | switch organization       | 200        |
//! | list contact points       | 200        |
//! | create / update           | 202        |
//! | delete                    | 202 or 404 |
//!
//! Anything else aborts the invocation with an [`Error`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contact_point;
pub mod declaration;
pub mod error;
pub mod org;
pub mod payload;
pub mod reconcile;
pub mod session;
pub mod transport;

pub use contact_point::{ContactPoint, ContactPointKind, ContactPointType, Target};
pub use declaration::Declaration;
pub use error::{Error, ErrorCategory, Result};
pub use payload::build_payload;
pub use reconcile::Reconciler;
pub use session::{Credentials, OrgSelector, Session};
pub use transport::http::{HttpOptions, HttpTransport};
pub use transport::{MockTransport, RecordedRequest, Transport};

pub use declarative::{Action, Diff, Outcome, Plan, Presence};

use serde_json::Value;

/// Everything needed to open a session against a Grafana server.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Base URL of the server.
    pub url: String,
    /// Authentication.
    pub credentials: Credentials,
    /// Organization to act in; ignored for API keys.
    pub org: OrgSelector,
    /// HTTP settings.
    pub http: HttpOptions,
}

impl ConnectOptions {
    /// Options for `url` with default organization and HTTP settings.
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
            org: OrgSelector::default(),
            http: HttpOptions::default(),
        }
    }
}

/// High-level client bound to one session.
///
/// Construction performs the organization switch for basic auth, so every
/// later request runs in the selected organization.
pub struct Client {
    transport: Box<dyn Transport>,
    session: Session,
}

impl Client {
    /// Connect over HTTP.
    ///
    /// # Errors
    ///
    /// Fails if the organization cannot be resolved or switched.
    pub fn connect(options: &ConnectOptions) -> Result<Self> {
        let transport = HttpTransport::new(&options.http);
        Self::with_transport(
            Box::new(transport),
            &options.url,
            &options.credentials,
            &options.org,
        )
    }

    /// Create a client with a custom transport (useful for testing).
    ///
    /// # Errors
    ///
    /// Fails if the organization cannot be resolved or switched.
    pub fn with_transport(
        transport: Box<dyn Transport>,
        url: &str,
        credentials: &Credentials,
        org: &OrgSelector,
    ) -> Result<Self> {
        let mut session = Session::new(url, credentials);
        if credentials.is_basic() {
            let org_id = org::select_org(transport.as_ref(), &session, org)?;
            session.set_org_id(org_id);
        } else {
            log::debug!("API key authentication, organization is fixed by the key");
        }
        Ok(Self { transport, session })
    }

    /// The session requests are issued in.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn reconciler(&self) -> Reconciler<'_, dyn Transport> {
        Reconciler::new(self.transport.as_ref(), &self.session)
    }

    /// Converge the contact point to the target.
    pub fn apply(&self, target: &Target) -> Result<Outcome> {
        self.reconciler().apply(target)
    }

    /// Decide what [`Client::apply`] would do without changing anything.
    pub fn plan(&self, target: &Target) -> Result<Plan> {
        self.reconciler().plan(target)
    }

    /// Fetch a contact point by uid.
    pub fn get(&self, uid: &str) -> Result<Option<Value>> {
        self.reconciler().fetch(uid)
    }
}
