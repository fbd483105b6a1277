//! History Integration
//!
//! The router records every navigation it performs in a [`History`] so the browser's back and
//! forward buttons keep working. Entries carry a [`HistoryState`] that holds the path they were
//! pushed for; popping an entry hands that state back to [`Router::handle_pop`].
//!
//! [`Router::handle_pop`]: crate::Router::handle_pop

use serde::{Deserialize, Serialize};

mod memory;
pub use memory::*;

/// The state object stored with each pushed history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub path: String,
}

impl HistoryState {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// An integration with some kind of navigation history.
pub trait History {
    /// Push a new entry whose URL is `state.path`.
    fn push(&self, state: &HistoryState);

    /// Replace the state of the current entry, keeping its URL at `state.path`.
    fn replace(&self, state: &HistoryState);

    /// Get the path of the current URL.
    ///
    /// **Must start** with `/`.
    fn current_path(&self) -> String;
}
