//! Example: converge an email contact point against an in-memory Grafana
//!
//! Run with: cargo run -p grafana --example reconcile_email

use grafana::{
    Client, ContactPoint, ContactPointKind, Credentials, MockTransport, OrgSelector, Target,
};

fn main() {
    println!("Contact point reconciliation");
    println!("============================\n");

    let mock = MockTransport::new();
    mock.add_org(1, "Main Org.");

    let client = match Client::with_transport(
        Box::new(mock.clone()),
        "http://localhost:3000",
        &Credentials::basic("admin", "admin"),
        &OrgSelector::default(),
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Connection failed: {e}");
            std::process::exit(1);
        }
    };

    let one = ContactPoint::new("email", "E-Mail", ContactPointKind::email(["example@example.com"]));
    let two = ContactPoint::new(
        "email",
        "E-Mail",
        ContactPointKind::email(["example@example.com", "other@example.com"]),
    );

    let steps: [(&str, Target); 4] = [
        ("create", one.clone().into()),
        ("rerun", one.into()),
        ("add a recipient", two.into()),
        ("remove", Target::absent("email")),
    ];

    for (label, target) in steps {
        match client.apply(&target) {
            Ok(outcome) => {
                println!("{label:>16}: changed={} state={}", outcome.changed, outcome.state);
                if let Some(diff) = outcome.diff {
                    for path in diff.changed_paths() {
                        println!("{:>16}  ~ {path}", "");
                    }
                }
            }
            Err(e) => {
                eprintln!("{label}: {e}");
                std::process::exit(1);
            }
        }
    }

    println!("\nRequests sent: {}", mock.requests().len());
}
