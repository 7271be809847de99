//! Organization scope resolution for basic auth sessions.
//!
//! With basic auth, Grafana acts in the user's active organization. The
//! session selects it once, before any contact point request:
//!
//! 1. resolve a name to an id through the user's memberships (optional)
//! 2. switch the active organization to that id
//!
//! Either step failing aborts the whole invocation.

use crate::error::{Error, Result};
use crate::session::{OrgSelector, Session};
use crate::transport::{Method, Transport};
use serde::Deserialize;

/// Organizations the authenticated user belongs to.
pub const USER_ORGS_PATH: &str = "/api/user/orgs";

/// Prefix of the endpoint switching the active organization.
pub const SWITCH_ORG_PREFIX: &str = "/api/user/using/";

/// Path switching the active organization to `org_id`.
#[must_use]
pub fn switch_org_path(org_id: i64) -> String {
    format!("{SWITCH_ORG_PREFIX}{org_id}")
}

#[derive(Debug, Deserialize)]
struct UserOrg {
    #[serde(rename = "orgId")]
    org_id: i64,
    name: String,
}

/// Find the id of the organization named exactly `name`.
///
/// # Errors
///
/// - [`Error::RemoteApi`] if listing organizations does not return 200
/// - [`Error::OrgNotFound`] if the user has no organization with that name
pub fn resolve_org_id_by_name<T>(transport: &T, session: &Session, name: &str) -> Result<i64>
where
    T: Transport + ?Sized,
{
    let response = transport.request(session, Method::Get, USER_ORGS_PATH, None)?;
    if response.status != 200 {
        return Err(Error::remote(
            "list organizations",
            response.status,
            response.body.text(),
        ));
    }

    let orgs: Vec<UserOrg> = serde_json::from_value(response.body.into_json()?)?;
    orgs.into_iter()
        .find(|org| org.name == name)
        .map(|org| org.org_id)
        .ok_or_else(|| Error::OrgNotFound(name.to_string()))
}

/// Make `org_id` the active organization of the authenticated user.
///
/// # Errors
///
/// Returns [`Error::OrgSwitch`] unless Grafana answers 200.
pub fn switch_active_org<T>(transport: &T, session: &Session, org_id: i64) -> Result<()>
where
    T: Transport + ?Sized,
{
    let response = transport.request(session, Method::Post, &switch_org_path(org_id), None)?;
    if response.status != 200 {
        return Err(Error::OrgSwitch {
            org_id,
            status: response.status,
            body: response.body.text(),
        });
    }
    Ok(())
}

/// Resolve the selector and switch to the resulting organization.
///
/// Returns the id of the now active organization.
pub fn select_org<T>(transport: &T, session: &Session, selector: &OrgSelector) -> Result<i64>
where
    T: Transport + ?Sized,
{
    let org_id = match selector {
        OrgSelector::Id(id) => *id,
        OrgSelector::Name(name) => {
            let id = resolve_org_id_by_name(transport, session, name)?;
            log::debug!("organization {name:?} has id {id}");
            id
        }
    };

    switch_active_org(transport, session, org_id)?;
    log::info!("switched to organization {org_id}");
    Ok(org_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Credentials;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn session() -> Session {
        Session::new("http://localhost:3000", &Credentials::basic("admin", "admin"))
    }

    #[test]
    fn test_switch_org_path() {
        assert_eq!(switch_org_path(2), "/api/user/using/2");
    }

    #[test]
    fn test_resolve_exact_name() {
        let mock = MockTransport::new();
        mock.add_org(1, "Main Org.");
        mock.add_org(4, "Ops");
        mock.add_org(5, "Ops Team");

        assert_eq!(resolve_org_id_by_name(&mock, &session(), "Ops").unwrap(), 4);
        assert_eq!(
            resolve_org_id_by_name(&mock, &session(), "Ops Team").unwrap(),
            5
        );
    }

    #[test]
    fn test_resolve_unknown_name() {
        let mock = MockTransport::new();
        mock.add_org(1, "Main Org.");

        let err = resolve_org_id_by_name(&mock, &session(), "main org.").unwrap_err();
        assert!(matches!(err, Error::OrgNotFound(ref name) if name == "main org."));
    }

    #[test]
    fn test_resolve_listing_failure() {
        let mock = MockTransport::new();
        mock.respond_with(Method::Get, USER_ORGS_PATH, 401, json!({"message": "Unauthorized"}));

        let err = resolve_org_id_by_name(&mock, &session(), "Ops").unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_switch_failure() {
        let mock = MockTransport::new();
        let err = switch_active_org(&mock, &session(), 42).unwrap_err();
        match err {
            Error::OrgSwitch { org_id, status, .. } => {
                assert_eq!(org_id, 42);
                assert_eq!(status, 401);
            }
            other => panic!("Expected Error::OrgSwitch, got {other:?}"),
        }
    }

    #[test]
    fn test_select_by_name_switches() {
        let mock = MockTransport::new();
        mock.add_org(7, "Alerting");

        let id = select_org(&mock, &session(), &OrgSelector::Name("Alerting".into())).unwrap();
        assert_eq!(id, 7);
        assert_eq!(mock.active_org(), Some(7));

        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/user/orgs", "/api/user/using/7"]);
    }

    #[test]
    fn test_select_by_id_skips_lookup() {
        let mock = MockTransport::new();
        mock.add_org(1, "Main Org.");

        select_org(&mock, &session(), &OrgSelector::Id(1)).unwrap();
        assert_eq!(mock.requests().len(), 1);
    }
}
