//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Credence CLI - consolidate and trust-grade extracted assertions.
#[derive(Debug, Parser)]
#[command(name = "credence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consolidate a batch of raw assertions into canonical relations
    Consolidate(ConsolidateArgs),

    /// Run the full pipeline: consolidate, then grade each relation
    Promote(PromoteArgs),

    /// Compare two fact values through the value algebra
    Value(ValueArgs),
}

/// Arguments for the consolidate command.
#[derive(Debug, Parser)]
pub struct ConsolidateArgs {
    /// JSON file containing an array of raw assertions
    #[arg(short, long)]
    pub input: String,

    /// Tenant identifier (overrides the config file)
    #[arg(short, long)]
    pub tenant: Option<String>,

    /// Restrict to a subject concept
    #[arg(long)]
    pub subject: Option<String>,

    /// Restrict to a source document
    #[arg(long)]
    pub doc: Option<String>,

    /// Also report value-level conflicts between relations
    #[arg(long)]
    pub conflicts: bool,

    /// Relative tolerance for conflict comparison
    #[arg(long, default_value = "0.0")]
    pub tolerance: f64,
}

/// Arguments for the promote command.
#[derive(Debug, Parser)]
pub struct PromoteArgs {
    /// JSON file containing an array of raw assertions
    #[arg(short, long)]
    pub input: String,

    /// Tenant identifier (overrides the config file)
    #[arg(short, long)]
    pub tenant: Option<String>,

    /// Restrict to a subject concept
    #[arg(long)]
    pub subject: Option<String>,

    /// Only show relations that reached the Strict tier
    #[arg(long)]
    pub strict_only: bool,
}

/// Arguments for value comparison.
#[derive(Debug, Parser)]
pub struct ValueArgs {
    #[command(subcommand)]
    pub action: ValueAction,
}

/// Value comparison actions.
#[derive(Debug, Subcommand)]
pub enum ValueAction {
    /// Test two values for equality
    Compare {
        /// Left value text (e.g. "99.5%")
        left: String,
        /// Right value text (e.g. "99.4 percent")
        right: String,
        /// Relative tolerance for scalar comparison
        #[arg(short, long, default_value = "0.0")]
        tolerance: f64,
    },

    /// Test whether the first value contains the second
    Contains {
        /// Container value text (e.g. "<= 30 min")
        left: String,
        /// Candidate value text (e.g. "25 min")
        right: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
