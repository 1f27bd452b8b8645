//! Content collections: markdown files with YAML frontmatter.
//!
//! The site's blog is a directory of markdown entries, one subdirectory per
//! locale. This crate loads and validates those entries into [`Article`]s,
//! which are [`Searchable`](sift_filter::Searchable) so they can be fed
//! straight into a [`FilterEngine`](sift_filter::FilterEngine).
//!
//! # Modules
//!
//! - [`locale`]: Supported site locales
//! - [`frontmatter`]: Frontmatter extraction and schema
//! - [`article`]: A validated content entry
//! - [`collection`]: Directory loading, draft handling, ordering

pub mod article;
pub mod collection;
pub mod frontmatter;
pub mod locale;

pub use article::Article;
pub use collection::{Collection, LoadOptions, SkippedFile};
pub use frontmatter::{Frontmatter, extract_frontmatter};
pub use locale::Locale;
