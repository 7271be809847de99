//! Planner - decides the action that converges a resource

use crate::types::{Action, Presence};

/// Decide the action from the desired presence and whether a remote match exists
///
/// | desired  | remote match | action |
/// |----------|--------------|--------|
/// | present  | no           | Create |
/// | present  | yes          | Update |
/// | absent   | yes          | Delete |
/// | absent   | no           | NoOp   |
///
/// A present resource with a remote match is always updated; whether that
/// changed anything is only known after the service answers.
pub fn decide(desired: Presence, exists: bool) -> Action {
    match (desired, exists) {
        (Presence::Present, false) => Action::Create,
        (Presence::Present, true) => Action::Update,
        (Presence::Absent, true) => Action::Delete,
        (Presence::Absent, false) => Action::NoOp,
    }
}
