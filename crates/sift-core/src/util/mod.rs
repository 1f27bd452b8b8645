//! Utility modules for file operations, path handling, and common helpers.
//!
//! # Modules
//!
//! - [`files`]: Async content file discovery and reading
//! - [`ids`]: Slug derivation from content paths
//! - [`paths`]: Path helpers (tilde expansion)

pub mod files;
pub mod ids;
pub mod paths;
