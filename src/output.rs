//! Rendering of reconciliation results
//!
//! JSON mode prints a stable document:
//! `{"changed", "state", "contact_point"?, "diff"?}`.

use crate::Context;
use crate::cli::OutputFormat;
use crate::ui;
use anyhow::Result;
use colored::Colorize;
use declarative::{Action, Diff, Outcome, Plan, Presence};
use serde::Serialize;
use serde_json::Value;

/// Result document of `apply`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub changed: bool,
    pub state: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<&'a Diff>,
}

impl<'a> From<&'a Outcome> for Report<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        Self {
            changed: outcome.changed,
            state: outcome.state,
            contact_point: outcome.resource.as_ref(),
            diff: outcome.diff.as_ref(),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the outcome of an apply
pub fn outcome(ctx: &Context, uid: &str, outcome: &Outcome) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(&Report::from(outcome));
    }

    match (outcome.changed, outcome.state) {
        (true, Presence::Present) if outcome.diff.is_some() => {
            ui::success(&format!("Updated contact point {}", uid.bold()));
        }
        (true, Presence::Present) => {
            ui::success(&format!("Created contact point {}", uid.bold()));
        }
        (true, Presence::Absent) => {
            ui::success(&format!("Deleted contact point {}", uid.bold()));
        }
        (false, Presence::Present) => {
            ui::info(&format!("Contact point {} is up to date", uid.bold()));
        }
        (false, Presence::Absent) => {
            ui::info(&format!("Contact point {} is already absent", uid.bold()));
        }
    }

    if let Some(diff) = &outcome.diff
        && !ctx.quiet
    {
        println!();
        ui::print_json_diff(&diff.before, &diff.after);
    }

    Ok(())
}

fn action_symbol(action: Action) -> colored::ColoredString {
    match action {
        Action::Create => "+".green(),
        Action::Update => "~".yellow(),
        Action::Delete => "-".red(),
        Action::NoOp => "✓".green(),
    }
}

/// Print what an apply would do
pub fn plan(ctx: &Context, plan: &Plan) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(plan);
    }

    let verb = match plan.action {
        Action::Create => "will be created",
        Action::Update => "will be updated if Grafana's copy differs",
        Action::Delete => "will be deleted",
        Action::NoOp => "needs no change",
    };
    println!(
        "{} contact point {} {}",
        action_symbol(plan.action),
        plan.resource_id.bold(),
        verb
    );

    if ctx.quiet || !plan.action.is_mutation() {
        return Ok(());
    }

    let (before, after) = plan_sides(plan);
    println!();
    ui::print_json_diff(&before, &after);

    Ok(())
}

/// Both sides of the diff shown for a plan; a missing side renders as `null`
fn plan_sides(plan: &Plan) -> (Value, Value) {
    (
        plan.before.clone().unwrap_or(Value::Null),
        plan.after.clone().unwrap_or(Value::Null),
    )
}

/// Print a contact point as stored remotely
pub fn contact_point(ctx: &Context, uid: &str, contact_point: Option<&Value>) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(&contact_point);
    }

    match contact_point {
        Some(cp) => {
            ui::header(&format!("Contact point {uid}"));
            for key in ["name", "type", "isDefault", "disableResolveMessage"] {
                if let Some(value) = cp.get(key) {
                    ui::kv(key, &display_scalar(value));
                }
            }
            if !ctx.quiet {
                println!();
                println!("{}", ui::pretty(cp));
            }
        }
        None => ui::warn(&format!("Contact point {uid} does not exist")),
    }

    Ok(())
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
