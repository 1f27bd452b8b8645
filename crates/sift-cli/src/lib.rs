//! Command-line front end for searching the clinic site's content.
//!
//! - [`cli`]: clap argument types
//! - [`config`]: [`SiftConfig`](config::SiftConfig) loading via `confyg`
//! - [`app`]: logging setup and command dispatch
//! - [`search_handlers`]: `search`, `list` and `interactive`
//! - [`config_handlers`]: `config {path,get,set,init,export}`

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod search_handlers;

pub use app::SiftCli;
pub use cli::CliArgs;
pub use config::SiftConfig;
