//! Core types for declarative resource management

use crate::diff::Diff;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Whether a resource should exist (or does exist) on the remote side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Resource exists/is configured
    #[default]
    Present,
    /// Resource does not exist/is not configured
    Absent,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired state of a resource as declared by the user
///
/// A present resource always carries its full wire representation.
/// Updates send this payload as-is; it is never merged with the remote copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesiredState {
    /// Resource should exist with exactly this representation
    Present { payload: Value },
    /// Resource should not exist
    Absent,
}

impl DesiredState {
    pub fn presence(&self) -> Presence {
        match self {
            Self::Present { .. } => Presence::Present,
            Self::Absent => Presence::Absent,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Present { payload } => Some(payload),
            Self::Absent => None,
        }
    }
}

/// Action needed to converge a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Nothing to do, no request is issued
    NoOp,
    /// Resource is missing and must be created
    Create,
    /// Resource exists and its representation is replaced
    Update,
    /// Resource exists and must be removed
    Delete,
}

impl Action {
    /// Check if executing this action issues a mutating request
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::NoOp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoOp => "no-op",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decided action for one resource, before anything is executed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    /// Identity of the resource
    pub resource_id: String,
    /// What reconciliation would do
    pub action: Action,
    /// Remote representation found by identity, if any
    pub before: Option<Value>,
    /// Representation that would be sent (None when absent is desired)
    pub after: Option<Value>,
}

/// Result of reconciling one resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Whether the remote state changed
    pub changed: bool,
    /// Presence of the resource after reconciliation
    pub state: Presence,
    /// Before/after representation when an existing resource was modified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Diff>,
    /// Representation returned by the remote service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
}

impl Outcome {
    /// Nothing changed; the resource is in `state`
    pub fn unchanged(state: Presence) -> Self {
        Self {
            changed: false,
            state,
            diff: None,
            resource: None,
        }
    }

    /// Resource was created and the service returned `resource`
    pub fn created(resource: Value) -> Self {
        Self {
            changed: true,
            state: Presence::Present,
            diff: None,
            resource: Some(resource),
        }
    }

    /// Resource was modified
    pub fn modified(diff: Diff, resource: Value) -> Self {
        Self {
            changed: true,
            state: Presence::Present,
            diff: Some(diff),
            resource: Some(resource),
        }
    }

    /// Resource was removed
    pub fn removed() -> Self {
        Self {
            changed: true,
            state: Presence::Absent,
            diff: None,
            resource: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_serde() {
        assert_eq!(serde_json::to_value(Presence::Absent).unwrap(), json!("absent"));
        let p: Presence = serde_json::from_value(json!("present")).unwrap();
        assert_eq!(p, Presence::Present);
    }

    #[test]
    fn test_desired_state_presence() {
        let desired = DesiredState::Present {
            payload: json!({"uid": "a"}),
        };
        assert_eq!(desired.presence(), Presence::Present);
        assert_eq!(desired.payload(), Some(&json!({"uid": "a"})));
        assert_eq!(DesiredState::Absent.presence(), Presence::Absent);
        assert!(DesiredState::Absent.payload().is_none());
    }

    #[test]
    fn test_action_is_mutation() {
        assert!(!Action::NoOp.is_mutation());
        assert!(Action::Create.is_mutation());
        assert!(Action::Update.is_mutation());
        assert!(Action::Delete.is_mutation());
        assert_eq!(Action::NoOp.to_string(), "no-op");
    }

    #[test]
    fn test_outcome_serialization_skips_empty_fields() {
        let value = serde_json::to_value(Outcome::unchanged(Presence::Absent)).unwrap();
        assert_eq!(value, json!({"changed": false, "state": "absent"}));

        let value = serde_json::to_value(Outcome::removed()).unwrap();
        assert_eq!(value, json!({"changed": true, "state": "absent"}));
    }
}
