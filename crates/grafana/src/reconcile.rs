//! Contact point reconciliation against the provisioning API.
//!
//! [`ContactPointStore`] maps the generic [`RemoteStore`] operations onto
//! the provisioning endpoints and decides which status codes are success.
//! [`Reconciler`] runs the fetch, match, decide, execute sequence from the
//! `declarative` crate on top of it.
//!
//! | Operation | Request                          | Success     |
//! |-----------|----------------------------------|-------------|
//! | list      | `GET    .../contact-points`      | 200         |
//! | create    | `POST   .../contact-points`      | 202         |
//! | update    | `PUT    .../contact-points/{uid}`| 202         |
//! | delete    | `DELETE .../contact-points/{uid}`| 202 or 404  |

use crate::contact_point::Target;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::transport::{Method, Response, Transport};
use declarative::{Deletion, Outcome, Plan, RemoteStore};
use serde_json::Value;

/// Collection endpoint of the provisioning API.
pub const CONTACT_POINTS_PATH: &str = "/api/v1/provisioning/contact-points";

/// Item endpoint for the contact point `uid`.
#[must_use]
pub fn contact_point_path(uid: &str) -> String {
    format!("{CONTACT_POINTS_PATH}/{uid}")
}

/// The provisioning API seen as a [`RemoteStore`].
pub struct ContactPointStore<'a, T: Transport + ?Sized> {
    transport: &'a T,
    session: &'a Session,
}

impl<'a, T: Transport + ?Sized> ContactPointStore<'a, T> {
    /// Create a store issuing requests through `transport` within `session`.
    pub fn new(transport: &'a T, session: &'a Session) -> Self {
        Self { transport, session }
    }

    fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        self.transport.request(self.session, method, path, body)
    }
}

fn unexpected(operation: String, response: Response) -> Error {
    Error::remote(operation, response.status, response.body.text())
}

impl<T: Transport + ?Sized> RemoteStore for ContactPointStore<'_, T> {
    type Error = Error;

    fn list(&self) -> Result<Vec<Value>> {
        let response = self.send(Method::Get, CONTACT_POINTS_PATH, None)?;
        if response.status != 200 {
            return Err(unexpected("list contact points".into(), response));
        }
        match response.body.into_json()? {
            Value::Array(items) => Ok(items),
            other => Err(Error::Transport(format!(
                "expected a list of contact points, got: {other}"
            ))),
        }
    }

    fn create(&self, payload: &Value) -> Result<Value> {
        let response = self.send(Method::Post, CONTACT_POINTS_PATH, Some(payload))?;
        if response.status != 202 {
            let uid = payload.get("uid").and_then(Value::as_str).unwrap_or_default();
            return Err(unexpected(format!("create contact point {uid}"), response));
        }
        response.body.into_json()
    }

    fn update(&self, uid: &str, payload: &Value) -> Result<Value> {
        let response = self.send(Method::Put, &contact_point_path(uid), Some(payload))?;
        if response.status != 202 {
            return Err(unexpected(format!("update contact point {uid}"), response));
        }
        response.body.into_json()
    }

    fn delete(&self, uid: &str) -> Result<Deletion> {
        let response = self.send(Method::Delete, &contact_point_path(uid), None)?;
        match response.status {
            202 => Ok(Deletion::Removed),
            404 => Ok(Deletion::AlreadyAbsent),
            _ => Err(unexpected(format!("delete contact point {uid}"), response)),
        }
    }
}

/// Converges contact points within one session.
pub struct Reconciler<'a, T: Transport + ?Sized> {
    store: ContactPointStore<'a, T>,
}

impl<'a, T: Transport + ?Sized> Reconciler<'a, T> {
    /// Create a reconciler for `session`.
    pub fn new(transport: &'a T, session: &'a Session) -> Self {
        Self {
            store: ContactPointStore::new(transport, session),
        }
    }

    /// Converge the contact point to the target.
    ///
    /// The target is validated first; an invalid target never reaches the network.
    ///
    /// # Errors
    ///
    /// Any transport failure or unexpected status aborts the pass.
    pub fn apply(&self, target: &Target) -> Result<Outcome> {
        target.validate()?;
        declarative::reconcile(&self.store, target)
    }

    /// Decide what [`Reconciler::apply`] would do without mutating anything.
    pub fn plan(&self, target: &Target) -> Result<Plan> {
        target.validate()?;
        declarative::plan(&self.store, target)
    }

    /// Fetch the contact point with the given uid, if it exists.
    pub fn fetch(&self, uid: &str) -> Result<Option<Value>> {
        let items = self.store.list()?;
        Ok(items
            .into_iter()
            .find(|cp| cp.get("uid").and_then(Value::as_str) == Some(uid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact_point::{ContactPoint, ContactPointKind};
    use crate::payload::build_payload;
    use crate::session::Credentials;
    use crate::transport::MockTransport;
    use declarative::{Action, Presence};
    use serde_json::json;

    fn session() -> Session {
        Session::new("http://localhost:3000", &Credentials::api_key("token"))
    }

    fn email(addresses: &[&str]) -> ContactPoint {
        ContactPoint::new(
            "email",
            "E-Mail",
            ContactPointKind::email(addresses.iter().copied()),
        )
    }

    #[test]
    fn test_contact_point_path() {
        assert_eq!(
            contact_point_path("email"),
            "/api/v1/provisioning/contact-points/email"
        );
    }

    #[test]
    fn test_scenario_create_update_delete() {
        let mock = MockTransport::new();
        let s = session();
        let reconciler = Reconciler::new(&mock, &s);

        // Empty store: create
        let created = reconciler
            .apply(&email(&["example@example.com"]).into())
            .unwrap();
        assert!(created.changed);
        assert_eq!(created.state, Presence::Present);
        assert_eq!(created.resource.as_ref().unwrap()["uid"], "email");

        // Same input: update path, echo equals stored entry
        let same = reconciler
            .apply(&email(&["example@example.com"]).into())
            .unwrap();
        assert!(!same.changed);
        assert!(same.diff.is_none());
        assert_eq!(mock.requests().last().unwrap().method, Method::Put);

        // Second address: update with diff
        let target: Target = email(&["example@example.com", "other@example.com"]).into();
        let updated = reconciler.apply(&target).unwrap();
        assert!(updated.changed);
        let diff = updated.diff.unwrap();
        assert_eq!(diff.before["settings"]["addresses"], "example@example.com");
        assert_eq!(
            diff.after["settings"]["addresses"],
            "example@example.com;other@example.com"
        );

        // Absent: delete
        let removed = reconciler.apply(&Target::absent("email")).unwrap();
        assert!(removed.changed);
        assert_eq!(removed.state, Presence::Absent);
        assert!(mock.contact_points().is_empty());

        // Absent again: nothing matches, no request issued
        let before = mock.mutation_count();
        let again = reconciler.apply(&Target::absent("email")).unwrap();
        assert!(!again.changed);
        assert_eq!(mock.mutation_count(), before);
    }

    #[test]
    fn test_final_remote_matches_payload() {
        let mock = MockTransport::new();
        let s = session();
        let reconciler = Reconciler::new(&mock, &s);
        let cp = email(&["a@x.com", "b@x.com"]).include_image(true);

        assert!(reconciler.apply(&cp.clone().into()).unwrap().changed);
        assert!(!reconciler.apply(&cp.clone().into()).unwrap().changed);
        assert_eq!(mock.contact_point("email"), Some(build_payload(&cp)));
    }

    #[test]
    fn test_update_unchanged_when_echo_matches_stored() {
        let mock = MockTransport::new();
        let stored = build_payload(&email(&["example@example.com"]));
        mock.add_contact_point(stored.clone());
        // Server ignores the new recipient and echoes what it had
        mock.respond_with(Method::Put, &contact_point_path("email"), 202, stored);
        let s = session();

        let target: Target = email(&["example@example.com", "other@example.com"]).into();
        let outcome = Reconciler::new(&mock, &s).apply(&target).unwrap();
        assert!(!outcome.changed);
        assert!(outcome.diff.is_none());
        assert_eq!(mock.mutation_count(), 1);
    }

    #[test]
    fn test_update_changed_when_echo_is_normalized() {
        let mock = MockTransport::new();
        let cp = email(&["example@example.com"]);
        let sent = build_payload(&cp);
        mock.add_contact_point(sent.clone());

        let mut echo = sent.clone();
        echo["provenance"] = json!("api");
        mock.respond_with(Method::Put, &contact_point_path("email"), 202, echo.clone());
        let s = session();

        let outcome = Reconciler::new(&mock, &s).apply(&cp.into()).unwrap();
        assert!(outcome.changed);
        let diff = outcome.diff.unwrap();
        assert_eq!(diff.before, sent);
        assert_eq!(diff.after, sent);
        assert_eq!(outcome.resource, Some(echo));
    }

    #[test]
    fn test_invalid_uid_never_reaches_a_path() {
        let mock = MockTransport::new();
        mock.add_contact_point(json!({"uid": "email"}));
        let s = session();

        let err = Reconciler::new(&mock, &s)
            .apply(&Target::absent("email/../other"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_delete_404_is_not_an_error() {
        let mock = MockTransport::new();
        mock.add_contact_point(json!({"uid": "email", "name": "E-Mail"}));
        mock.respond_with(
            Method::Delete,
            &contact_point_path("email"),
            404,
            json!({"message": "not found"}),
        );
        let s = session();

        let outcome = Reconciler::new(&mock, &s)
            .apply(&Target::absent("email"))
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.state, Presence::Absent);
    }

    #[test]
    fn test_delete_unexpected_status_is_fatal() {
        let mock = MockTransport::new();
        mock.add_contact_point(json!({"uid": "email"}));
        mock.respond_with(Method::Delete, &contact_point_path("email"), 409, json!({}));
        let s = session();

        let err = Reconciler::new(&mock, &s)
            .apply(&Target::absent("email"))
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_create_500_is_fatal() {
        let mock = MockTransport::new();
        mock.respond_with(
            Method::Post,
            CONTACT_POINTS_PATH,
            500,
            json!({"message": "internal error"}),
        );
        let s = session();

        let err = Reconciler::new(&mock, &s)
            .apply(&email(&["a@x.com"]).into())
            .unwrap_err();
        match err {
            Error::RemoteApi { status, body, .. } => {
                assert_eq!(status, 500);
                assert!(body.contains("internal error"));
            }
            other => panic!("Expected Error::RemoteApi, got {other:?}"),
        }
    }

    #[test]
    fn test_update_unexpected_status_is_fatal() {
        let mock = MockTransport::new();
        mock.add_contact_point(json!({"uid": "email"}));
        mock.respond_with(Method::Put, &contact_point_path("email"), 400, json!({}));
        let s = session();

        let err = Reconciler::new(&mock, &s)
            .apply(&email(&["a@x.com"]).into())
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_list_failure_is_fatal_and_nothing_mutates() {
        let mock = MockTransport::new();
        mock.respond_with(Method::Get, CONTACT_POINTS_PATH, 403, json!({"message": "denied"}));
        let s = session();

        let err = Reconciler::new(&mock, &s)
            .apply(&email(&["a@x.com"]).into())
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(mock.mutation_count(), 0);
    }

    #[test]
    fn test_list_not_an_array() {
        let mock = MockTransport::new();
        mock.respond_with(Method::Get, CONTACT_POINTS_PATH, 200, json!({"items": []}));
        let s = session();

        let err = Reconciler::new(&mock, &s).fetch("email").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_identity_keyed_matching() {
        let mock = MockTransport::new();
        let other = json!({"uid": "B", "name": "E-Mail", "type": "email"});
        mock.add_contact_point(other.clone());
        let s = session();
        let reconciler = Reconciler::new(&mock, &s);

        let cp = ContactPoint::new("A", "E-Mail", ContactPointKind::email(["a@x.com"]));
        assert!(reconciler.apply(&cp.into()).unwrap().changed);
        assert!(reconciler.apply(&Target::absent("A")).unwrap().changed);

        assert_eq!(mock.contact_points(), vec![other]);
    }

    #[test]
    fn test_invalid_target_sends_nothing() {
        let mock = MockTransport::new();
        let s = session();
        let cp = ContactPoint::new("email", "E-Mail", ContactPointKind::email(Vec::<String>::new()));

        let err = Reconciler::new(&mock, &s).apply(&cp.into()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_plan_and_fetch() {
        let mock = MockTransport::new();
        mock.add_contact_point(json!({"uid": "email", "name": "E-Mail"}));
        let s = session();
        let reconciler = Reconciler::new(&mock, &s);

        let plan = reconciler.plan(&Target::absent("email")).unwrap();
        assert_eq!(plan.action, Action::Delete);
        assert_eq!(mock.mutation_count(), 0);

        assert!(reconciler.fetch("email").unwrap().is_some());
        assert!(reconciler.fetch("missing").unwrap().is_none());
    }

    #[test]
    fn test_sends_authorization_on_every_request() {
        let mock = MockTransport::new();
        let s = Session::new("http://localhost:3000", &Credentials::basic("admin", "admin"));
        Reconciler::new(&mock, &s)
            .apply(&email(&["a@x.com"]).into())
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.authorization == "Basic YWRtaW46YWRtaW4="));
        assert_eq!(requests[1].body, Some(build_payload(&email(&["a@x.com"]))));
    }
}
