use colored::Colorize;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message to stderr
pub fn hint(msg: &str) {
    eprintln!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// JSON Diffs
// ============================================================================

/// Render a JSON value the way diffs compare it
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// A line of a rendered diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Removed(String),
    Added(String),
    Context(String),
}

/// Line diff of two JSON documents, pretty-printed
pub fn json_diff(before: &Value, after: &Value) -> Vec<DiffLine> {
    let text_a = pretty(before);
    let text_b = pretty(after);
    let diff = TextDiff::from_lines(&text_a, &text_b);

    diff.iter_all_changes()
        .map(|change| {
            let line = change.value().trim_end_matches('\n').to_string();
            match change.tag() {
                ChangeTag::Delete => DiffLine::Removed(line),
                ChangeTag::Insert => DiffLine::Added(line),
                ChangeTag::Equal => DiffLine::Context(line),
            }
        })
        .collect()
}

/// Print a colored unified view of a JSON diff
pub fn print_json_diff(before: &Value, after: &Value) {
    for line in json_diff(before, after) {
        match line {
            DiffLine::Removed(l) => println!("    {}", format!("- {l}").red()),
            DiffLine::Added(l) => println!("    {}", format!("+ {l}").green()),
            DiffLine::Context(l) => println!("    {}", format!("  {l}").dimmed()),
        }
    }
}
