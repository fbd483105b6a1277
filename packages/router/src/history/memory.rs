use std::cell::RefCell;

use super::{History, HistoryState};

struct MemoryHistoryState {
    initial: String,
    initial_state: Option<HistoryState>,
    current: String,
    entries: Vec<HistoryState>,
    future: Vec<HistoryState>,
}

/// A [`History`] that stores all navigation information in memory.
///
/// ```rust
/// # use pageswap_router::prelude::*;
/// let history = MemoryHistory::with_initial_path("/");
/// history.push(&HistoryState::new("/tools.html"));
/// assert_eq!(history.current_path(), "/tools.html");
///
/// // the initial entry was loaded directly, so it has no state to hand back
/// assert_eq!(history.go_back(), None);
/// assert_eq!(history.current_path(), "/");
/// ```
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`. The initial entry carries no state, like a
    /// page the browser loaded directly.
    pub fn with_initial_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            state: RefCell::new(MemoryHistoryState {
                initial: path.clone(),
                initial_state: None,
                current: path,
                entries: Vec::new(),
                future: Vec::new(),
            }),
        }
    }

    /// The states pushed up to and including the current entry, oldest first.
    pub fn entries(&self) -> Vec<HistoryState> {
        self.state.borrow().entries.clone()
    }

    /// Go back one entry, returning the state a browser would deliver with `popstate`.
    pub fn go_back(&self) -> Option<HistoryState> {
        let mut write = self.state.borrow_mut();
        let left = write.entries.pop()?;
        write.future.push(left);

        let current = match write.entries.last() {
            Some(state) => Some(state.clone()),
            None => write.initial_state.clone(),
        };
        write.current = match write.entries.last() {
            Some(state) => state.path.clone(),
            None => write.initial.clone(),
        };
        current
    }

    /// Go forward one entry, returning its state.
    pub fn go_forward(&self) -> Option<HistoryState> {
        let mut write = self.state.borrow_mut();
        let next = write.future.pop()?;
        write.current = next.path.clone();
        write.entries.push(next.clone());
        Some(next)
    }
}

impl History for MemoryHistory {
    fn push(&self, state: &HistoryState) {
        let mut write = self.state.borrow_mut();
        write.current = state.path.clone();
        write.entries.push(state.clone());
        write.future.clear();
    }

    fn replace(&self, state: &HistoryState) {
        let write = &mut *self.state.borrow_mut();
        write.current = state.path.clone();
        match write.entries.last_mut() {
            Some(entry) => *entry = state.clone(),
            None => {
                write.initial = state.path.clone();
                write.initial_state = Some(state.clone());
            }
        }
    }

    fn current_path(&self) -> String {
        self.state.borrow().current.clone()
    }
}
