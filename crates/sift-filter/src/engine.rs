//! The debounced filter engine.
//!
//! [`FilterEngine`] holds a collection, the fields to search, and two query
//! values: the raw query, updated on every keystroke, and the settled query,
//! which only changes once the raw query has stayed put for the debounce
//! interval. The filtered view is always computed from the settled query.
//!
//! # Settling
//!
//! Every [`set_query`](FilterEngine::set_query) bumps a generation counter,
//! aborts the pending settle task and schedules a new one, all under the same
//! lock the settle task takes before publishing. A settle whose generation is
//! no longer current is dropped, so at most one settle per burst is ever
//! observed. [`clear_search`](FilterEngine::clear_search) settles `""` on the
//! spot.
//!
//! Settled values are published on a [`watch`] channel; owners that need to
//! re-render on settle call [`subscribe`](FilterEngine::subscribe).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sift_core::Result;
use tokio::sync::watch;

use crate::field::Searchable;
use crate::matcher;
use crate::options::FilterOptions;
use crate::timer::DebounceTimer;

/// State shared with the pending settle task.
#[derive(Debug)]
struct Shared {
    generation: Mutex<u64>,
    settled: watch::Sender<String>,
}

impl Shared {
    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        self.generation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `query` if no newer update has happened since `ticket` was issued.
    fn settle(&self, ticket: u64, query: String) {
        let generation = self.lock_generation();
        if *generation != ticket {
            log::debug!("dropping stale settle (ticket {ticket}, current {})", *generation);
            return;
        }
        log::debug!("query settled: {query:?}");
        self.settled.send_replace(query);
    }
}

#[derive(Debug)]
struct FilterCache {
    query: String,
    indices: Vec<usize>,
}

/// Debounced search over an owned collection.
///
/// Must be created inside a Tokio runtime; the pending settle runs as a Tokio
/// task and is aborted when the engine is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use sift_filter::{FilterEngine, FilterOptions};
///
/// # async fn example() -> sift_core::Result<()> {
/// let items = vec![json!({ "title": "Endomidface Guide" }), json!({ "title": "Browlift Basics" })];
/// let mut engine = FilterEngine::new(items, ["title"], FilterOptions::default())?;
///
/// engine.set_query("endo");
/// assert_eq!(engine.search_term(), "endo");
/// assert_eq!(engine.debounced_search_term(), ""); // not settled yet
///
/// engine.clear_search();
/// assert_eq!(engine.result_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FilterEngine<T> {
    items: Vec<T>,
    search_fields: Vec<String>,
    options: FilterOptions,
    raw_query: String,
    shared: Arc<Shared>,
    timer: DebounceTimer,
    cache: Mutex<Option<FilterCache>>,
}

impl<T: Searchable> FilterEngine<T> {
    /// Create an engine over `items`, searching `search_fields`.
    ///
    /// Both queries start at `options.initial_term`. Duplicate field names
    /// are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`sift_core::Error::Runtime`] outside a Tokio runtime.
    pub fn new<I, S>(items: Vec<T>, search_fields: I, options: FilterOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let timer = DebounceTimer::new(options.debounce())?;
        let (settled, _) = watch::channel(options.initial_term.clone());

        Ok(Self {
            items,
            search_fields: dedup_fields(search_fields),
            raw_query: options.initial_term.clone(),
            options,
            shared: Arc::new(Shared {
                generation: Mutex::new(0),
                settled,
            }),
            timer,
            cache: Mutex::new(None),
        })
    }

    /// Update the raw query and (re)start the debounce interval.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.raw_query.clone_from(&query);

        let mut generation = self.shared.lock_generation();
        *generation += 1;
        let ticket = *generation;
        let shared = Arc::clone(&self.shared);
        self.timer.schedule(move || shared.settle(ticket, query));
    }

    /// Clear both queries immediately, discarding any pending settle.
    pub fn clear_search(&mut self) {
        self.raw_query.clear();

        let mut generation = self.shared.lock_generation();
        *generation += 1;
        if self.timer.cancel() {
            log::debug!("pending settle cancelled by clear");
        }
        self.shared.settled.send_replace(String::new());
    }

    /// The most recently set query (alias: raw query).
    pub fn search_term(&self) -> &str {
        &self.raw_query
    }

    /// The query currently used for filtering (alias: settled query).
    pub fn debounced_search_term(&self) -> String {
        self.shared.settled.borrow().clone()
    }

    /// Whether the settled query is long enough to filter on.
    pub fn is_searching(&self) -> bool {
        matcher::is_active_query(&self.shared.settled.borrow(), self.options.min_chars)
    }

    /// The items matching the settled query, in collection order.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.with_indices(|indices| indices.iter().map(|&idx| &self.items[idx]).collect())
    }

    /// Number of items matching the settled query.
    pub fn result_count(&self) -> usize {
        self.with_indices(<[usize]>::len)
    }

    /// Whether a settle is scheduled but has not fired.
    pub fn has_pending_settle(&self) -> bool {
        self.timer.is_pending()
    }

    /// Receive every settled query as it is published.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.settled.subscribe()
    }

    /// The full, unfiltered collection.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The searched field names.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// The engine's options.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Replace the collection. The filtered view is recomputed on next read.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.invalidate();
    }

    /// Replace the searched fields. The filtered view is recomputed on next read.
    pub fn set_search_fields<I, S>(&mut self, search_fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = dedup_fields(search_fields);
        self.invalidate();
    }

    /// Consume the engine, returning the collection.
    pub fn into_items(self) -> Vec<T> {
        let Self { items, .. } = self;
        items
    }

    fn with_indices<R>(&self, f: impl FnOnce(&[usize]) -> R) -> R {
        let settled = self.debounced_search_term();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(hit) = cache.as_ref().filter(|c| c.query == settled) {
            return f(&hit.indices);
        }

        let indices = matcher::matching_indices(
            &self.items,
            &self.search_fields,
            &settled,
            self.options.min_chars,
        );
        let result = f(&indices);
        *cache = Some(FilterCache {
            query: settled,
            indices,
        });
        result
    }

    fn invalidate(&mut self) {
        *self.cache.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn dedup_fields<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for field in fields {
        let field = field.into();
        if !out.contains(&field) {
            out.push(field);
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
