//! Contact point model.
//!
//! This module contains the desired-state types: what a contact point
//! should look like ([`ContactPoint`]) and whether it should exist at all
//! ([`Target`]).

use crate::error::{Error, Result};
use crate::payload::build_payload;
use declarative::{DesiredState, Resource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest uid Grafana accepts.
pub const MAX_UID_LENGTH: usize = 40;

/// Check that `uid` is a valid Grafana uid.
///
/// Grafana uids are at most [`MAX_UID_LENGTH`] characters from
/// `[A-Za-z0-9_-]`. The uid becomes a URL path segment, so anything else
/// is rejected before a request is built.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the uid is empty, too long, or contains
/// other characters.
pub fn validate_uid(uid: &str) -> Result<()> {
    if uid.trim().is_empty() {
        return Err(Error::validation("uid is required"));
    }
    if uid.len() > MAX_UID_LENGTH {
        return Err(Error::validation(format!(
            "uid {uid:?} is longer than {MAX_UID_LENGTH} characters"
        )));
    }
    if let Some(c) = uid
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(Error::validation(format!(
            "uid {uid:?} contains {c:?}; only letters, digits, '-' and '_' are allowed"
        )));
    }
    Ok(())
}

/// Contact point types this crate knows how to encode.
///
/// # Example
///
/// ```
/// use grafana::ContactPointType;
///
/// assert_eq!(ContactPointType::Email.as_str(), "email");
/// assert_eq!(ContactPointType::Email.to_string(), "email");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointType {
    /// Email notifications.
    Email,
}

impl ContactPointType {
    /// Type name as used by the Grafana API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ContactPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific settings of a contact point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPointKind {
    /// Email notifications.
    Email {
        /// Recipients, in order. Must not be empty.
        addresses: Vec<String>,
        /// Send a single email to all recipients instead of one per recipient.
        single_email: Option<bool>,
    },
}

impl ContactPointKind {
    /// Email settings for the given recipients.
    pub fn email<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Email {
            addresses: addresses.into_iter().map(Into::into).collect(),
            single_email: None,
        }
    }

    /// The type this kind encodes.
    #[must_use]
    pub fn contact_point_type(&self) -> ContactPointType {
        match self {
            Self::Email { .. } => ContactPointType::Email,
        }
    }

    /// Check the type-specific required fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a required setting is missing.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Email { addresses, .. } => {
                if addresses.is_empty() {
                    return Err(Error::validation(
                        "type is email but email_addresses is empty",
                    ));
                }
                if addresses.iter().any(|a| a.trim().is_empty()) {
                    return Err(Error::validation("email_addresses contains a blank entry"));
                }
                Ok(())
            }
        }
    }
}

/// Desired configuration of a contact point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPoint {
    /// Identity of the contact point.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Type and type-specific settings.
    pub kind: ContactPointKind,
    /// Use as the default contact point.
    pub is_default: bool,
    /// Do not send a notification when an alert resolves.
    pub disable_resolve_message: bool,
    /// Attach a screenshot of the panel to notifications.
    pub include_image: bool,
}

impl ContactPoint {
    /// Create a contact point with all flags off.
    pub fn new(uid: impl Into<String>, name: impl Into<String>, kind: ContactPointKind) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            kind,
            is_default: false,
            disable_resolve_message: false,
            include_image: false,
        }
    }

    /// Set the default flag.
    pub fn is_default(mut self, value: bool) -> Self {
        self.is_default = value;
        self
    }

    /// Set the disable-resolve-message flag.
    pub fn disable_resolve_message(mut self, value: bool) -> Self {
        self.disable_resolve_message = value;
        self
    }

    /// Set the include-image flag.
    pub fn include_image(mut self, value: bool) -> Self {
        self.include_image = value;
        self
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        validate_uid(&self.uid)?;
        if self.name.trim().is_empty() {
            return Err(Error::validation("name is required when state is present"));
        }
        self.kind.validate()
    }
}

/// A contact point together with whether it should exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The contact point should exist exactly as declared.
    Present(ContactPoint),
    /// No contact point with this uid should exist.
    Absent {
        /// Identity of the contact point to remove.
        uid: String,
    },
}

impl Target {
    /// Target removing the contact point `uid`.
    pub fn absent(uid: impl Into<String>) -> Self {
        Self::Absent { uid: uid.into() }
    }

    /// Identity of the targeted contact point.
    #[must_use]
    pub fn uid(&self) -> &str {
        match self {
            Self::Present(cp) => &cp.uid,
            Self::Absent { uid } => uid,
        }
    }

    /// Check the target before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if required fields are missing.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Present(cp) => cp.validate(),
            Self::Absent { uid } => validate_uid(uid),
        }
    }
}

impl From<ContactPoint> for Target {
    fn from(cp: ContactPoint) -> Self {
        Self::Present(cp)
    }
}

impl Resource for Target {
    fn id(&self) -> &str {
        self.uid()
    }

    fn resource_type(&self) -> &'static str {
        "contact_point"
    }

    fn description(&self) -> String {
        match self {
            Self::Present(cp) => format!(
                "Ensure {} contact point {:?} ({}) exists",
                cp.kind.contact_point_type(),
                cp.name,
                cp.uid
            ),
            Self::Absent { uid } => format!("Ensure contact point {uid} is absent"),
        }
    }

    fn desired_state(&self) -> DesiredState {
        match self {
            Self::Present(cp) => DesiredState::Present {
                payload: build_payload(cp),
            },
            Self::Absent { .. } => DesiredState::Absent,
        }
    }
}
