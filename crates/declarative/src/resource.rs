//! Resource trait for declarative state management
//!
//! A Resource describes one remote object by identity together with the
//! state it should be in.

use crate::types::DesiredState;
use serde_json::Value;
use std::fmt;

/// Core trait for declarative resources
///
/// Every managed resource provides:
/// - Identity (id, description, type)
/// - Its desired state, including the full wire representation when present
/// - How to recognize itself in a remote listing
///
/// # Example
///
/// ```
/// use declarative::{DesiredState, Resource};
/// use serde_json::{Value, json};
///
/// #[derive(Debug)]
/// struct Team {
///     uid: String,
///     name: String,
/// }
///
/// impl Resource for Team {
///     fn id(&self) -> &str {
///         &self.uid
///     }
///
///     fn resource_type(&self) -> &'static str {
///         "team"
///     }
///
///     fn description(&self) -> String {
///         format!("Team {}", self.name)
///     }
///
///     fn desired_state(&self) -> DesiredState {
///         DesiredState::Present {
///             payload: json!({"uid": self.uid, "name": self.name}),
///         }
///     }
/// }
///
/// let team = Team { uid: "ops".into(), name: "Ops".into() };
/// assert!(team.matches(&json!({"uid": "ops", "name": "Renamed"})));
/// assert!(!team.matches(&json!({"uid": "dev", "name": "Ops"})));
/// ```
pub trait Resource: fmt::Debug {
    /// Unique identifier of the resource on the remote side
    fn id(&self) -> &str;

    /// Resource type category, used in logs and output
    fn resource_type(&self) -> &'static str;

    /// Human-readable description of what this resource does
    fn description(&self) -> String;

    /// The state this resource should converge to
    fn desired_state(&self) -> DesiredState;

    /// Name of the field carrying the identity in remote representations
    fn identity_field(&self) -> &'static str {
        "uid"
    }

    /// Check if a remote representation is this resource
    ///
    /// Only the identity field is compared; two remote objects with the
    /// same name but different identities are different resources.
    fn matches(&self, remote: &Value) -> bool {
        remote.get(self.identity_field()).and_then(Value::as_str) == Some(self.id())
    }
}
