//! Per-page initialization that has to run again after every swap.

/// What was just swapped in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageContext<'a> {
    /// The resolved route path, e.g. `/` for an unknown path.
    pub path: &'a str,
    pub file: &'a str,
    pub title: Option<&'a str>,
}

/// Re-initializes page scripts after the mount's content was replaced.
///
/// Hooks run synchronously, in registration order, between the content replacement and the enter
/// transition. They must tolerate pages that have none of the markup they look for.
pub trait PageHook {
    fn after_swap(&self, page: &PageContext<'_>);
}

impl<F> PageHook for F
where
    F: Fn(&PageContext<'_>),
{
    fn after_swap(&self, page: &PageContext<'_>) {
        self(page)
    }
}
