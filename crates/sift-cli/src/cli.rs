//! CLI argument parsing and command definitions.
//!
//! Global flags select the config file and verbosity; subcommands search,
//! browse, and configure the content collection.

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "sift", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "SIFT_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the collection once and print the matches.
    Search(SearchArgs),

    /// Read queries from stdin, printing results as each one settles.
    Interactive {
        /// Collection scope.
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// List the loaded collection.
    List {
        /// Collection scope.
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Which entries and fields a command works on.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Field to search; repeatable. Defaults to `search.fields`.
    #[arg(short, long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Only entries in this locale (pt, en, es).
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Collection name; defaults to `content.collection`.
    #[arg(long)]
    pub collection: Option<String>,

    /// Include draft entries.
    #[arg(long)]
    pub drafts: bool,
}

/// Arguments for `sift search`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query text; matched case-insensitively as a substring.
    pub query: String,

    /// Collection scope.
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Minimum query length before filtering applies.
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Maximum number of results to print.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "search.debounce_ms").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "search.debounce_ms").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
