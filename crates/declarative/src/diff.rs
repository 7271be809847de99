//! Diff between the remote representation of a resource and what was sent

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Before/after pair reported when an existing resource changes
///
/// `after` is the representation that was sent, not what the remote
/// service echoed back. Services may normalize fields, so `after` can
/// differ from the resulting remote state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    /// Remote representation before the change
    pub before: Value,
    /// Representation sent to the remote service
    pub after: Value,
}

impl Diff {
    pub fn new(before: Value, after: Value) -> Self {
        Self { before, after }
    }

    /// Dotted paths of the leaves that differ between both sides
    ///
    /// Keys present on only one side are reported too. Arrays are compared
    /// as a whole.
    pub fn changed_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_changes("", &self.before, &self.after, &mut paths);
        paths.sort();
        paths
    }
}

fn collect_changes(prefix: &str, before: &Value, after: &Value, out: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, left) in a {
                let path = join(prefix, key);
                match b.get(key) {
                    Some(right) => collect_changes(&path, left, right, out),
                    None => out.push(path),
                }
            }
            for key in b.keys().filter(|k| !a.contains_key(*k)) {
                out.push(join(prefix, key));
            }
        }
        (a, b) if a != b => out.push(if prefix.is_empty() {
            ".".to_string()
        } else {
            prefix.to_string()
        }),
        _ => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
