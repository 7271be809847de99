use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use grafana::{ContactPointType, session::DEFAULT_URL, transport::http::DEFAULT_TIMEOUT};

#[derive(Parser)]
#[command(name = "cpctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Declaratively manage Grafana alerting contact points", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Converge a contact point to the declared state
    Apply(ApplyArgs),

    /// Show what apply would do, without changing anything
    Plan(ApplyArgs),

    /// Print a contact point as Grafana stores it
    Show(ShowArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Connection
// ============================================================================

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Grafana base URL
    #[arg(long, env = "GRAFANA_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// API key or service account token
    #[arg(long, env = "GRAFANA_API_KEY", conflicts_with = "user", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Basic auth user
    #[arg(long, env = "GRAFANA_USER", default_value = "admin")]
    pub user: String,

    /// Basic auth password
    #[arg(long, env = "GRAFANA_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub password: String,

    /// Organization id to act in (basic auth only)
    #[arg(long, env = "GRAFANA_ORG_ID", default_value_t = 1)]
    pub org_id: i64,

    /// Organization name to act in; takes precedence over --org-id
    #[arg(long, env = "GRAFANA_ORG_NAME")]
    pub org_name: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,
}

// ============================================================================
// Declaration
// ============================================================================

#[derive(Args, Debug)]
pub struct DeclarationArgs {
    /// Read the declaration from a TOML or JSON file
    #[arg(
        short,
        long,
        conflicts_with_all = [
            "uid", "name", "kind", "state", "email_addresses", "email_single",
            "is_default", "include_image", "disable_resolve_message",
        ]
    )]
    pub file: Option<String>,

    /// Contact point uid
    #[arg(long)]
    pub uid: Option<String>,

    /// Contact point name (required when present)
    #[arg(long)]
    pub name: Option<String>,

    /// Contact point type (required when present)
    #[arg(long = "type", id = "kind", value_enum)]
    pub kind: Option<ContactPointTypeArg>,

    /// Whether the contact point should exist
    #[arg(long, value_enum)]
    pub state: Option<StateArg>,

    /// Email recipient; repeat or separate with commas
    #[arg(long = "email-address", id = "email_addresses", value_delimiter = ',')]
    pub email_addresses: Vec<String>,

    /// Send a single email to all recipients
    #[arg(long)]
    pub email_single: bool,

    /// Make this the default contact point
    #[arg(long)]
    pub is_default: bool,

    /// Attach a panel screenshot to notifications
    #[arg(long)]
    pub include_image: bool,

    /// Do not notify when an alert resolves
    #[arg(long)]
    pub disable_resolve_message: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContactPointTypeArg {
    Email,
}

impl From<ContactPointTypeArg> for ContactPointType {
    fn from(arg: ContactPointTypeArg) -> Self {
        match arg {
            ContactPointTypeArg::Email => ContactPointType::Email,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Absent,
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub declaration: DeclarationArgs,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Contact point uid
    pub uid: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}
