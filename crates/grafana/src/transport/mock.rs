//! In-memory Grafana for testing without network access.

use crate::error::Result;
use crate::org::{SWITCH_ORG_PREFIX, USER_ORGS_PATH};
use crate::reconcile::CONTACT_POINTS_PATH;
use crate::session::Session;
use crate::transport::{Body, Method, Response, Transport};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A request received by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL.
    pub path: String,
    /// JSON body, if one was sent.
    pub body: Option<Value>,
    /// `Authorization` header that was attached.
    pub authorization: String,
}

#[derive(Debug, Clone)]
struct Override {
    method: Method,
    path: String,
    response: Response,
}

#[derive(Debug, Default)]
struct State {
    orgs: Vec<Value>,
    active_org: Option<i64>,
    contact_points: Vec<Value>,
    overrides: Vec<Override>,
    requests: Vec<RecordedRequest>,
}

/// Mock transport emulating the organization and contact point endpoints.
///
/// Contact points are echoed back exactly as sent, like a server that does
/// not normalize anything. Clones share state, so a test can keep one handle
/// while the client owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    /// Create a new empty mock with no organizations and no contact points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an organization the user is a member of.
    pub fn add_org(&self, org_id: i64, name: &str) {
        let mut state = self.state();
        state.orgs.push(json!({"orgId": org_id, "name": name, "role": "Admin"}));
    }

    /// Store a contact point as if it had been provisioned before.
    pub fn add_contact_point(&self, contact_point: Value) {
        let mut state = self.state();
        state.contact_points.push(contact_point);
    }

    /// Answer every `method` request to `path` with a fixed response.
    pub fn respond_with(&self, method: Method, path: &str, status: u16, body: Value) {
        let mut state = self.state();
        state.overrides.push(Override {
            method,
            path: path.to_string(),
            response: Response::json(status, body),
        });
    }

    /// All stored contact points.
    #[must_use]
    pub fn contact_points(&self) -> Vec<Value> {
        self.state().contact_points.clone()
    }

    /// Stored contact point with the given uid.
    #[must_use]
    pub fn contact_point(&self, uid: &str) -> Option<Value> {
        self.state()
            .contact_points
            .iter()
            .find(|cp| uid_of(cp) == Some(uid))
            .cloned()
    }

    /// Organization selected through the switch endpoint.
    #[must_use]
    pub fn active_org(&self) -> Option<i64> {
        self.state().active_org
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// Number of create, update and delete requests received.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.path.starts_with(CONTACT_POINTS_PATH) && r.method != Method::Get)
            .count()
    }
}

impl Transport for MockTransport {
    fn request(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
            authorization: session.authorization().to_string(),
        });

        if let Some(o) = state
            .overrides
            .iter()
            .find(|o| o.method == method && o.path == path)
        {
            return Ok(o.response.clone());
        }

        Ok(route(&mut state, method, path, body))
    }
}

fn route(state: &mut State, method: Method, path: &str, body: Option<&Value>) -> Response {
    if path == USER_ORGS_PATH && method == Method::Get {
        return Response::json(200, Value::Array(state.orgs.clone()));
    }

    if let Some(id) = path.strip_prefix(SWITCH_ORG_PREFIX)
        && method == Method::Post
    {
        let known = id
            .parse::<i64>()
            .ok()
            .filter(|id| state.orgs.iter().any(|o| o["orgId"].as_i64() == Some(*id)));
        return match known {
            Some(id) => {
                state.active_org = Some(id);
                Response::json(200, json!({"message": "Active organization changed"}))
            }
            None => Response::json(401, json!({"message": "Not a valid organization"})),
        };
    }

    if path == CONTACT_POINTS_PATH {
        return match (method, body) {
            (Method::Get, _) => Response::json(200, Value::Array(state.contact_points.clone())),
            (Method::Post, Some(payload)) => {
                let exists = uid_of(payload)
                    .is_some_and(|uid| state.contact_points.iter().any(|cp| uid_of(cp) == Some(uid)));
                if exists {
                    Response::json(400, json!({"message": "contact point with this uid already exists"}))
                } else {
                    state.contact_points.push(payload.clone());
                    Response::json(202, payload.clone())
                }
            }
            _ => bad_request(),
        };
    }

    if let Some(uid) = path.strip_prefix(CONTACT_POINTS_PATH).and_then(|p| p.strip_prefix('/')) {
        let index = state.contact_points.iter().position(|cp| uid_of(cp) == Some(uid));
        return match (method, index, body) {
            (Method::Put, Some(i), Some(payload)) => {
                state.contact_points[i] = payload.clone();
                Response::json(202, payload.clone())
            }
            (Method::Delete, Some(i), _) => {
                state.contact_points.remove(i);
                Response::new(202, Body::Empty)
            }
            (Method::Put | Method::Delete, None, _) => not_found(),
            _ => bad_request(),
        };
    }

    not_found()
}

fn uid_of(value: &Value) -> Option<&str> {
    value.get("uid").and_then(Value::as_str)
}

fn not_found() -> Response {
    Response::json(404, json!({"message": "Not found"}))
}

fn bad_request() -> Response {
    Response::json(400, json!({"message": "bad request"}))
}
