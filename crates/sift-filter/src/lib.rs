//! Debounced multi-field search filtering.
//!
//! This crate provides the search box behaviour used by the site's blog and
//! procedure listings: a query that settles only after the user stops typing,
//! and a filtered view over an in-memory collection.
//!
//! # Modules
//!
//! - [`field`]: [`Searchable`] records and their [`FieldValue`]s
//! - [`matcher`]: the pure, case-insensitive substring filter
//! - [`options`]: [`FilterOptions`] (debounce interval, minimum query length)
//! - [`timer`]: [`DebounceTimer`], an owned cancel-and-reschedule task handle
//! - [`engine`]: [`FilterEngine`], which ties the above together
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use sift_filter::{FilterEngine, FilterOptions};
//!
//! # async fn example() -> sift_core::Result<()> {
//! let posts = vec![
//!     json!({ "title": "Endomidface Guide", "tags": ["Surgery", "Face"] }),
//!     json!({ "title": "Browlift Basics", "tags": ["Recovery"] }),
//! ];
//! let mut engine = FilterEngine::new(posts, ["title", "tags"], FilterOptions::default())?;
//! let mut settled = engine.subscribe();
//!
//! engine.set_query("endo");
//! settled.changed().await.ok();
//! assert_eq!(engine.result_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod field;
pub mod matcher;
pub mod options;
pub mod timer;

pub use engine::FilterEngine;
pub use field::{FieldValue, Searchable};
pub use matcher::{filter_items, is_active_query, matching_indices};
pub use options::{DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_CHARS, FilterOptions};
pub use timer::DebounceTimer;
