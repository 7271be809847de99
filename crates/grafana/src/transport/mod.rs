//! Transport trait and implementations for talking to the Grafana API.
//!
//! This module provides the [`Transport`] trait, the blocking
//! [`http::HttpTransport`] used against real servers, and
//! [`MockTransport`], an in-memory Grafana used in tests.
//!
//! A transport never interprets status codes: error statuses come back as
//! ordinary [`Response`]s and only connection or decoding failures become
//! errors.
//!
//! # Testing
//!
//! ```
//! use grafana::transport::{Method, MockTransport, Transport};
//! use grafana::{Credentials, Session};
//!
//! let mock = MockTransport::new();
//! let session = Session::new("http://localhost:3000", &Credentials::api_key("token"));
//!
//! let response = mock
//!     .request(&session, Method::Get, "/api/v1/provisioning/contact-points", None)
//!     .unwrap();
//! assert_eq!(response.status, 200);
//! ```

pub mod http;
mod mock;

pub use mock::{MockTransport, RecordedRequest};

use crate::error::{Error, Result};
use crate::session::Session;
use serde_json::Value;
use std::fmt;

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods used by the provisioning and user APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body, decoded as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// No body.
    Empty,
    /// A JSON document.
    Json(Value),
    /// Bytes that are not valid JSON.
    Raw(Vec<u8>),
}

impl Body {
    /// Decode raw response bytes.
    #[must_use]
    pub fn decode(bytes: Vec<u8>) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(bytes),
        }
    }

    /// Body as text, for error messages.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Json(value) => value.to_string(),
            Self::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Take the JSON document; an empty body is `null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the body is not JSON.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Self::Empty => Ok(Value::Null),
            Self::Json(value) => Ok(value),
            Self::Raw(bytes) => Err(Error::Transport(format!(
                "expected a JSON response, got: {}",
                String::from_utf8_lossy(&bytes)
            ))),
        }
    }
}

/// Status code plus decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body.
    pub body: Body,
}

impl Response {
    /// Create a response.
    pub fn new(status: u16, body: Body) -> Self {
        Self { status, body }
    }

    /// Convenience constructor for a JSON response.
    pub fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            body: Body::Json(value),
        }
    }
}

/// Issues authenticated requests against the Grafana API.
///
/// Implementations attach the session's `Authorization` header and a JSON
/// content type to every request. They do not retry.
pub trait Transport: Send + Sync {
    /// Send one request and return the status code and decoded body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the request could not be completed.
    fn request(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response>;
}
