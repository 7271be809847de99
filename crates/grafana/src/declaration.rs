//! Flat, user-facing declaration of a contact point.
//!
//! This is the shape accepted from command-line flags and declaration
//! files. [`Declaration::into_target`] checks the required fields for the
//! requested state and type, so nothing reaches the network unless the
//! declaration is complete.

use crate::contact_point::{ContactPoint, ContactPointKind, ContactPointType, Target, validate_uid};
use crate::error::{Error, Result};
use declarative::Presence;
use serde::{Deserialize, Serialize};

/// A contact point as declared by the user.
///
/// # Example
///
/// ```
/// use grafana::{ContactPointType, Declaration};
///
/// let declaration = Declaration {
///     uid: Some("email".into()),
///     name: Some("E-Mail".into()),
///     kind: Some(ContactPointType::Email),
///     email_addresses: Some(vec!["example@example.com".into()]),
///     ..Default::default()
/// };
/// let target = declaration.into_target().unwrap();
/// assert_eq!(target.uid(), "email");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Declaration {
    /// Identity of the contact point.
    pub uid: Option<String>,
    /// Display name; required when present.
    pub name: Option<String>,
    /// Contact point type; required when present.
    #[serde(rename = "type")]
    pub kind: Option<ContactPointType>,
    /// Whether the contact point should exist.
    pub state: Presence,
    /// Use as the default contact point.
    pub is_default: bool,
    /// Attach a panel screenshot to notifications.
    pub include_image: bool,
    /// Do not notify when an alert resolves.
    pub disable_resolve_message: bool,
    /// Email recipients; required when the type is email.
    pub email_addresses: Option<Vec<String>>,
    /// Send one email to all recipients.
    pub email_single: Option<bool>,
}

impl Declaration {
    /// Validate and convert into a reconciliation target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when:
    /// - `uid` is missing, blank or not a valid Grafana uid
    /// - `state` is present and `name` or `type` is missing
    /// - `type` is email and `email_addresses` is missing or empty
    pub fn into_target(self) -> Result<Target> {
        let uid = self.uid.unwrap_or_default();
        validate_uid(&uid)?;

        let kind = match self.kind {
            Some(ContactPointType::Email) => {
                let addresses = self.email_addresses.unwrap_or_default();
                let kind = ContactPointKind::Email {
                    addresses,
                    single_email: self.email_single,
                };
                kind.validate()?;
                Some(kind)
            }
            None => None,
        };

        match self.state {
            Presence::Absent => Ok(Target::Absent { uid }),
            Presence::Present => {
                let (name, kind) = match (self.name, kind) {
                    (Some(name), Some(kind)) if !name.trim().is_empty() => (name, kind),
                    (name, kind) => {
                        let mut missing = Vec::new();
                        if name.is_none_or(|n| n.trim().is_empty()) {
                            missing.push("name");
                        }
                        if kind.is_none() {
                            missing.push("type");
                        }
                        return Err(Error::validation(format!(
                            "state is present but all of the following are missing: {}",
                            missing.join(", ")
                        )));
                    }
                };

                let cp = ContactPoint {
                    uid,
                    name,
                    kind,
                    is_default: self.is_default,
                    disable_resolve_message: self.disable_resolve_message,
                    include_image: self.include_image,
                };
                cp.validate()?;
                Ok(Target::Present(cp))
            }
        }
    }
}
