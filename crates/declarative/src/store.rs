//! Remote store trait
//!
//! This trait lets the declarative crate converge resources without
//! depending on a specific API, transport or error type.

use serde_json::Value;

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// The resource existed and was removed
    Removed,
    /// The resource was already gone
    AlreadyAbsent,
}

/// A remote collection of resources addressable by identity
///
/// Implementations translate each call into the remote protocol and decide
/// which responses count as success. Anything else must be returned as an
/// error; the executor never retries.
pub trait RemoteStore {
    /// Error type surfaced verbatim to the caller
    type Error;

    /// List every resource in the collection
    fn list(&self) -> Result<Vec<Value>, Self::Error>;

    /// Create a resource, returning the representation the service echoed
    fn create(&self, payload: &Value) -> Result<Value, Self::Error>;

    /// Replace the resource identified by `id`, returning the echoed representation
    fn update(&self, id: &str, payload: &Value) -> Result<Value, Self::Error>;

    /// Delete the resource identified by `id`
    fn delete(&self, id: &str) -> Result<Deletion, Self::Error>;
}
