//! Filter configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default minimum trimmed query length before filtering kicks in.
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Options for a [`FilterEngine`](crate::FilterEngine).
///
/// Deserializable so it can be embedded in a TOML config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// How long a query must stay unchanged before it settles.
    pub debounce_ms: u64,

    /// Minimum trimmed query length (in characters) that activates filtering.
    pub min_chars: usize,

    /// Query the engine starts with, already settled.
    pub initial_term: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_chars: DEFAULT_MIN_CHARS,
            initial_term: String::new(),
        }
    }
}

impl FilterOptions {
    /// Sets the debounce interval in milliseconds.
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Sets the minimum query length.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Sets the initial query.
    pub fn with_initial_term(mut self, term: impl Into<String>) -> Self {
        self.initial_term = term.into();
        self
    }

    /// The debounce interval as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
