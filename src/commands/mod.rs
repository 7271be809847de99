//! Command implementations
//!
//! Every command resolves its inputs first and only then connects, so an
//! invalid declaration never reaches the network.

pub mod apply;
pub mod plan;
pub mod show;

use crate::cli::ConnectionArgs;
use anyhow::{Context as AnyhowContext, Result};
use grafana::{Client, ConnectOptions, Credentials, HttpOptions, OrgSelector};
use std::time::Duration;

/// Translate connection flags into client options
pub fn connect_options(args: &ConnectionArgs) -> ConnectOptions {
    let credentials = match &args.api_key {
        Some(key) => Credentials::api_key(key),
        None => Credentials::basic(&args.user, &args.password),
    };

    let org = match &args.org_name {
        Some(name) => OrgSelector::Name(name.clone()),
        None => OrgSelector::Id(args.org_id),
    };

    ConnectOptions {
        url: args.url.clone(),
        credentials,
        org,
        http: HttpOptions::default()
            .timeout(Duration::from_secs(args.timeout))
            .verify_tls(!args.insecure),
    }
}

/// Open a session against the configured Grafana
pub fn connect(args: &ConnectionArgs) -> Result<Client> {
    let options = connect_options(args);
    log::debug!("connecting to {} as {:?}", options.url, options.credentials);
    Client::connect(&options).with_context(|| format!("Could not open a session on {}", options.url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            url: "https://grafana.example.com/".into(),
            api_key: None,
            user: "admin".into(),
            password: "secret".into(),
            org_id: 1,
            org_name: None,
            timeout: 5,
            insecure: false,
        }
    }

    #[test]
    fn test_basic_auth_with_org_id() {
        let options = connect_options(&ConnectionArgs {
            org_id: 3,
            ..args()
        });
        assert_eq!(options.credentials, Credentials::basic("admin", "secret"));
        assert_eq!(options.org, OrgSelector::Id(3));
        assert_eq!(options.http.timeout, Duration::from_secs(5));
        assert!(options.http.verify_tls);
    }

    #[test]
    fn test_api_key_wins() {
        let options = connect_options(&ConnectionArgs {
            api_key: Some("glsa_x".into()),
            ..args()
        });
        assert!(!options.credentials.is_basic());
    }

    #[test]
    fn test_org_name_takes_precedence() {
        let options = connect_options(&ConnectionArgs {
            org_id: 4,
            org_name: Some("Ops".into()),
            ..args()
        });
        assert_eq!(options.org, OrgSelector::Name("Ops".into()));
    }

    #[test]
    fn test_insecure_disables_verification() {
        let options = connect_options(&ConnectionArgs {
            insecure: true,
            ..args()
        });
        assert!(!options.http.verify_tls);
    }
}
