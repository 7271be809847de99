use crate::cli::{DeclarationArgs, StateArg};
use anyhow::{Context, Result, bail};
use declarative::Presence;
use grafana::Declaration;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Declaration Files
// ============================================================================

/// Supported declaration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    Toml,
    Json,
}

impl DeclarationFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(other) => bail!(
                "Unsupported declaration format '.{}' for {} (expected .toml or .json)",
                other,
                path.display()
            ),
            None => bail!(
                "Cannot tell the format of {} (expected .toml or .json)",
                path.display()
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Could not expand path {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Parse a declaration in the given format
pub fn parse_declaration(content: &str, format: DeclarationFormat) -> Result<Declaration> {
    let declaration = match format {
        DeclarationFormat::Toml => toml::from_str(content)?,
        DeclarationFormat::Json => serde_json::from_str(content)?,
    };
    Ok(declaration)
}

/// Load a declaration file
pub fn load_declaration(path: &str) -> Result<Declaration> {
    let path = expand_path(path)?;
    let format = DeclarationFormat::from_path(&path)?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    log::debug!("loading {} declaration from {}", format.name(), path.display());

    parse_declaration(&content, format)
        .with_context(|| format!("Invalid {} declaration in {}", format.name(), path.display()))
}

// ============================================================================
// Command-line Declarations
// ============================================================================

impl From<StateArg> for Presence {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Present => Presence::Present,
            StateArg::Absent => Presence::Absent,
        }
    }
}

/// Build the declaration from either `--file` or the inline flags
pub fn resolve_declaration(args: DeclarationArgs) -> Result<Declaration> {
    if let Some(file) = &args.file {
        return load_declaration(file);
    }

    Ok(Declaration {
        uid: args.uid,
        name: args.name,
        kind: args.kind.map(Into::into),
        state: args.state.map(Into::into).unwrap_or_default(),
        is_default: args.is_default,
        include_image: args.include_image,
        disable_resolve_message: args.disable_resolve_message,
        email_addresses: (!args.email_addresses.is_empty()).then_some(args.email_addresses),
        email_single: args.email_single.then_some(true),
    })
}
