//! Wire representation of a contact point.
//!
//! The payload is always rebuilt in full from the declaration. The base
//! shape is common to every type; each [`ContactPointKind`] then adds its
//! own entries to `settings`.

use crate::contact_point::{ContactPoint, ContactPointKind};
use serde_json::{Map, Value, json};

/// Separator Grafana expects between email recipients.
pub const EMAIL_SEPARATOR: &str = ";";

/// Build the provisioning API body for a contact point.
///
/// # Example
///
/// ```
/// use grafana::{ContactPoint, ContactPointKind, build_payload};
///
/// let cp = ContactPoint::new("email", "E-Mail", ContactPointKind::email(["a@x.com", "b@x.com"]));
/// let payload = build_payload(&cp);
/// assert_eq!(payload["type"], "email");
/// assert_eq!(payload["settings"]["addresses"], "a@x.com;b@x.com");
/// ```
#[must_use]
pub fn build_payload(cp: &ContactPoint) -> Value {
    let mut settings = Map::new();
    settings.insert("uploadImage".to_string(), Value::Bool(cp.include_image));
    apply_kind_settings(&cp.kind, &mut settings);

    json!({
        "uid": cp.uid,
        "name": cp.name,
        "type": cp.kind.contact_point_type().as_str(),
        "isDefault": cp.is_default,
        "disableResolveMessage": cp.disable_resolve_message,
        "settings": Value::Object(settings),
    })
}

fn apply_kind_settings(kind: &ContactPointKind, settings: &mut Map<String, Value>) {
    match kind {
        ContactPointKind::Email {
            addresses,
            single_email,
        } => email_settings(addresses, *single_email, settings),
    }
}

fn email_settings(addresses: &[String], single_email: Option<bool>, settings: &mut Map<String, Value>) {
    settings.insert(
        "addresses".to_string(),
        Value::String(addresses.join(EMAIL_SEPARATOR)),
    );
    // Only a set flag is sent; false and unset both leave the key out
    if single_email == Some(true) {
        settings.insert("singleEmail".to_string(), Value::Bool(true));
    }
}
