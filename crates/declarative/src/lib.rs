//! # Declarative
//!
//! A framework for declarative management of remote resources.
//!
//! This crate provides the core abstractions for declaring desired state,
//! detecting current state, and converging a remote collection to match it.
//!
//! ## Core Concepts
//!
//! - **Resource**: Something with an identity and a desired state
//! - **DesiredState**: Present with a full wire representation, or absent
//! - **RemoteStore**: The remote collection, addressed by identity
//! - **Plan**: The action that would converge a resource, computed without side effects
//! - **Outcome**: Whether anything changed, plus the before/after diff
//!
//! ## Example
//!
//! ```
//! use declarative::{Deletion, DesiredState, Presence, RemoteStore, Resource, reconcile};
//! use serde_json::{Value, json};
//! use std::cell::RefCell;
//!
//! #[derive(Debug)]
//! struct Team { uid: String }
//!
//! impl Resource for Team {
//!     fn id(&self) -> &str { &self.uid }
//!     fn resource_type(&self) -> &'static str { "team" }
//!     fn description(&self) -> String { format!("Team {}", self.uid) }
//!     fn desired_state(&self) -> DesiredState {
//!         DesiredState::Present { payload: json!({"uid": self.uid}) }
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Memory(RefCell<Vec<Value>>);
//!
//! impl RemoteStore for Memory {
//!     type Error = std::convert::Infallible;
//!     fn list(&self) -> Result<Vec<Value>, Self::Error> { Ok(self.0.borrow().clone()) }
//!     fn create(&self, payload: &Value) -> Result<Value, Self::Error> {
//!         self.0.borrow_mut().push(payload.clone());
//!         Ok(payload.clone())
//!     }
//!     fn update(&self, _id: &str, payload: &Value) -> Result<Value, Self::Error> {
//!         Ok(payload.clone())
//!     }
//!     fn delete(&self, _id: &str) -> Result<Deletion, Self::Error> {
//!         Ok(Deletion::AlreadyAbsent)
//!     }
//! }
//!
//! let store = Memory::default();
//! let team = Team { uid: "ops".into() };
//!
//! let outcome = reconcile(&store, &team).unwrap();
//! assert!(outcome.changed);
//! assert_eq!(outcome.state, Presence::Present);
//!
//! // Converged: the second pass reports no change
//! assert!(!reconcile(&store, &team).unwrap().changed);
//! ```

pub mod diff;
pub mod executor;
pub mod planner;
pub mod resource;
pub mod store;
pub mod types;

// Re-export main types at crate root
pub use diff::Diff;
pub use executor::{find_current, plan, reconcile};
pub use planner::decide;
pub use resource::Resource;
pub use store::{Deletion, RemoteStore};
pub use types::{Action, DesiredState, Outcome, Plan, Presence};
