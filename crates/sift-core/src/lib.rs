//! Sift core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all Sift crates.
//! It has no internal Sift dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction shared by the CLI and loaders
//! - [`util`]: File discovery, path, and slug utilities

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::ids::{normalize_slug, slug_from_path};
