//! The `sift` application: logging setup and command dispatch.

use crate::cli::{CliArgs, Command};
use crate::config::SiftConfig;
use crate::{config_handlers, search_handlers};
use sift_core::Result;
use sift_core::traits::ConfigProvider;
use std::io::Write;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SiftCli
// ============================================================================

/// The CLI application, holding the loaded configuration.
pub struct SiftCli {
    name: String,
    config: Arc<SiftConfig>,
    version: String,
}

impl SiftCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = SiftConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: SiftConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    /// Initialise tracing-based logging on stderr.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        tracing::debug!(project = self.config.project_name(), "starting {}", self.name);

        let mut stdout = std::io::stdout().lock();
        self.dispatch(args, &mut stdout).await
    }

    async fn dispatch(&self, args: CliArgs, out: &mut impl Write) -> Result<()> {
        match args.command {
            Some(Command::Version) => {
                writeln!(out, "{} {}", self.name, self.version)?;
                Ok(())
            }
            Some(Command::Search(search)) => {
                search_handlers::handle_search(&self.config, &search, out).await
            }
            Some(Command::List { scope }) => {
                search_handlers::handle_list(&self.config, &scope, out).await
            }
            Some(Command::Interactive { scope }) => {
                let stdin = BufReader::new(tokio::io::stdin());
                search_handlers::handle_interactive(&self.config, &scope, stdin, out).await
            }
            Some(Command::Config(config_cmd)) => config_handlers::handle_config_command(
                args.config.as_deref(),
                config_cmd.command,
                out,
            ),
            None => {
                writeln!(out, "{} {} - use --help for usage", self.name, self.version)?;
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
