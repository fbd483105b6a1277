//! Types relating to navigation.

use std::{cell::Cell, fmt};

use crate::error::NavigationError;

/// Identifies one navigation. Only the most recently issued token may touch the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationToken(u64);

/// Issues [`NavigationToken`]s and remembers the latest one.
#[derive(Debug, Default)]
pub(crate) struct Navigations {
    latest: Cell<u64>,
}

impl Navigations {
    /// Start a navigation, superseding every earlier one.
    pub(crate) fn begin(&self) -> NavigationToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        NavigationToken(next)
    }

    pub(crate) fn is_current(&self, token: NavigationToken) -> bool {
        self.latest.get() == token.0
    }
}

/// Everything one navigation call needs to know about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    /// The resolved route path. Unknown paths have already become `/`.
    pub path: String,
    /// The backing file of `path`.
    pub file: String,
    /// Whether a history entry should be pushed once the swap is applied.
    pub push_state: bool,
    pub token: NavigationToken,
}

/// How a navigation call ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The page was swapped in.
    Completed,
    /// The page could not be loaded; the user was notified and the old content stayed.
    Failed(NavigationError),
    /// A later navigation started before this one could apply its effects, so they were dropped.
    Superseded,
}

impl NavigationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// What a click on a link should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// The href is a known route: navigate to it in place.
    Navigate(String),
    /// The href is an in-page fragment: scroll the element with this id into view.
    ScrollTo(String),
    /// Let the browser handle the link.
    Native,
}

/// The phases a navigation moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Fetching,
    Extracting,
    Transitioning,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Fetching => "fetching",
            Phase::Extracting => "extracting",
            Phase::Transitioning => "transitioning",
            Phase::Error => "error",
        };
        f.write_str(name)
    }
}
