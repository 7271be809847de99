//! Blocking HTTP transport.
//!
//! This module provides [`HttpTransport`], which talks to a real Grafana
//! server with a `ureq` agent. Status codes are never turned into errors
//! here; that decision belongs to the caller.

use crate::error::Result;
use crate::session::Session;
use crate::transport::{Body, JSON_CONTENT_TYPE, Method, Response, Transport};
use serde_json::Value;
use std::time::Duration;
use ureq::tls::TlsConfig;
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

/// Default timeout for a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for the HTTP agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Upper bound for one request, connect to last body byte.
    pub timeout: Duration,
    /// Verify the server's TLS certificate.
    pub verify_tls: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
        }
    }
}

impl HttpOptions {
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable TLS certificate verification.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }
}

/// Transport backed by a blocking `ureq` agent.
///
/// # Example
///
/// ```no_run
/// use grafana::transport::http::{HttpOptions, HttpTransport};
/// use grafana::transport::{Method, Transport};
/// use grafana::{Credentials, Session};
///
/// let transport = HttpTransport::new(&HttpOptions::default());
/// let session = Session::new("http://localhost:3000", &Credentials::basic("admin", "admin"));
/// let response = transport.request(&session, Method::Get, "/api/user/orgs", None).unwrap();
/// println!("HTTP {}", response.status);
/// ```
pub struct HttpTransport {
    /// HTTP agent for requests.
    agent: Agent,
}

impl HttpTransport {
    /// Create a transport with the given options.
    #[must_use]
    pub fn new(options: &HttpOptions) -> Self {
        // Redirects come back as plain 3xx responses; following one would
        // drop the Authorization header and turn POST into GET
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .timeout_global(Some(options.timeout))
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!options.verify_tls)
                    .build(),
            )
            .build();

        Self {
            agent: config.into(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&HttpOptions::default())
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response> {
        let url = session.url(path);
        let authorization = session.authorization();
        log::debug!("{method} {url}");

        let result = match method {
            Method::Get => self
                .agent
                .get(&url)
                .header("Authorization", authorization)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .call(),
            Method::Delete => self
                .agent
                .delete(&url)
                .header("Authorization", authorization)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .call(),
            Method::Post => send(self.agent.post(&url), authorization, body),
            Method::Put => send(self.agent.put(&url), authorization, body),
        };

        let mut response = result?;
        let status = response.status().as_u16();
        let bytes = response.body_mut().read_to_vec()?;
        log::debug!("{method} {url} -> {status} ({} bytes)", bytes.len());

        Ok(Response::new(status, Body::decode(bytes)))
    }
}

fn send(
    request: RequestBuilder<WithBody>,
    authorization: &str,
    body: Option<&Value>,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let request = request
        .header("Authorization", authorization)
        .header("Content-Type", JSON_CONTENT_TYPE);
    match body {
        Some(json) => request.send_json(json),
        None => request.send_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HttpOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(options.verify_tls);
    }

    #[test]
    fn test_options_builder() {
        let options = HttpOptions::default()
            .timeout(Duration::from_secs(30))
            .verify_tls(false);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert!(!options.verify_tls);
    }

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new(&HttpOptions::default().verify_tls(false));
        // Just verify building the agent doesn't panic
        let _ = transport;
        let _ = HttpTransport::default();
    }

    /// Serve `count` connections, answering each with a redirect
    fn serve_redirects(count: usize) -> (String, std::thread::JoinHandle<Vec<String>>) {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for _ in 0..count {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&request);
                seen.push(head.lines().next().unwrap_or_default().to_string());
                stream
                    .write_all(
                        b"HTTP/1.1 302 Found\r\nLocation: /moved\r\n\
                          Content-Length: 0\r\nConnection: close\r\n\r\n",
                    )
                    .unwrap();
            }
            seen
        });
        (url, handle)
    }

    #[test]
    fn test_redirect_is_returned_not_followed() {
        use crate::reconcile::{CONTACT_POINTS_PATH, ContactPointStore};
        use crate::session::Credentials;
        use declarative::RemoteStore;

        let (url, server) = serve_redirects(2);
        let transport = HttpTransport::new(&HttpOptions::default().timeout(Duration::from_secs(5)));
        let session = Session::new(&url, &Credentials::api_key("k"));

        let response = transport
            .request(&session, Method::Get, CONTACT_POINTS_PATH, None)
            .unwrap();
        assert_eq!(response.status, 302);

        let err = ContactPointStore::new(&transport, &session)
            .list()
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::RemoteApi { status: 302, .. }));

        let seen = server.join().unwrap();
        assert!(seen.iter().all(|line| line.contains(CONTACT_POINTS_PATH)));
        assert!(!seen.iter().any(|line| line.contains("/moved")));
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        use crate::error::Error;
        use crate::session::Credentials;

        let transport =
            HttpTransport::new(&HttpOptions::default().timeout(Duration::from_secs(2)));
        // Port 9 (discard) on localhost is closed on any sane test machine
        let session = Session::new("http://127.0.0.1:9", &Credentials::api_key("k"));
        let err = transport
            .request(&session, Method::Get, "/api/user/orgs", None)
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
