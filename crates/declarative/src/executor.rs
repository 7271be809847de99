//! Execution engine - converges one resource against a remote store
//!
//! A pass is strictly sequential: one list request, then at most one
//! mutating request. Errors abort the pass and are returned unchanged.

use crate::diff::Diff;
use crate::planner::decide;
use crate::resource::Resource;
use crate::store::{Deletion, RemoteStore};
use crate::types::{DesiredState, Outcome, Plan, Presence};
use serde_json::Value;

/// Find the remote representation of a resource by identity
pub fn find_current<S, R>(store: &S, resource: &R) -> Result<Option<Value>, S::Error>
where
    S: RemoteStore,
    R: Resource + ?Sized,
{
    let listing = store.list()?;
    Ok(listing.into_iter().find(|remote| resource.matches(remote)))
}

/// Fetch the current state and decide what reconciliation would do
///
/// Never issues a mutating request.
pub fn plan<S, R>(store: &S, resource: &R) -> Result<Plan, S::Error>
where
    S: RemoteStore,
    R: Resource + ?Sized,
{
    let before = find_current(store, resource)?;
    let desired = resource.desired_state();
    let action = decide(desired.presence(), before.is_some());

    log::debug!(
        "{} {}: desired {}, remote {}, action {}",
        resource.resource_type(),
        resource.id(),
        desired.presence(),
        if before.is_some() { "found" } else { "missing" },
        action
    );

    Ok(Plan {
        resource_id: resource.id().to_string(),
        action,
        before,
        after: desired.payload().cloned(),
    })
}

/// Converge a resource to its desired state
///
/// # Returns
/// The outcome, including a before/after diff when an existing resource
/// was changed.
pub fn reconcile<S, R>(store: &S, resource: &R) -> Result<Outcome, S::Error>
where
    S: RemoteStore,
    R: Resource + ?Sized,
{
    let before = find_current(store, resource)?;
    let desired = resource.desired_state();
    let action = decide(desired.presence(), before.is_some());

    log::info!(
        "{} {}: {}",
        resource.resource_type(),
        resource.id(),
        action
    );

    let outcome = match (desired, before) {
        (DesiredState::Present { payload }, None) => {
            let created = store.create(&payload)?;
            Outcome::created(created)
        }
        (DesiredState::Present { payload }, Some(before)) => {
            let echoed = store.update(resource.id(), &payload)?;
            // The echo decides whether anything changed, the diff shows what was sent
            if before == echoed {
                Outcome::unchanged(Presence::Present)
            } else {
                Outcome::modified(Diff::new(before, payload), echoed)
            }
        }
        (DesiredState::Absent, Some(_)) => match store.delete(resource.id())? {
            Deletion::Removed => Outcome::removed(),
            Deletion::AlreadyAbsent => {
                log::debug!("{} {} already absent", resource.resource_type(), resource.id());
                Outcome::unchanged(Presence::Absent)
            }
        },
        (DesiredState::Absent, None) => Outcome::unchanged(Presence::Absent),
    };

    Ok(outcome)
}
