//! Core traits for Sift domain abstraction.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where a site's
//! content lives so loaders and the CLI do not depend on a concrete config type.

use std::path::PathBuf;

use crate::Result;

/// Trait for site configuration.
///
/// Implemented by the CLI's TOML-backed config and by test fixtures.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use sift_core::traits::ConfigProvider;
/// use sift_core::Result;
///
/// #[derive(Clone)]
/// struct ClinicSite {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for ClinicSite {
///     fn project_name(&self) -> &str {
///         "clinic-site"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_path(&self, collection: &str) -> Result<PathBuf> {
///         Ok(self.root.join("src/content").join(collection))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content collection.
    ///
    /// `collection` is a site-defined key like `"blog"` or `"procedures"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is unknown or the path
    /// cannot be resolved.
    fn content_path(&self, collection: &str) -> Result<PathBuf>;
}
