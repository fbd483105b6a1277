//! The parts of the page the router draws on.

use std::cell::{Cell, RefCell};

/// The two halves of the swap animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Fade the old content out and lift it slightly.
    Exit,
    /// Bring the new content back to full opacity and its resting position.
    Enter,
}

impl Transition {
    pub fn opacity(self) -> &'static str {
        match self {
            Transition::Exit => "0",
            Transition::Enter => "1",
        }
    }

    pub fn transform(self) -> &'static str {
        match self {
            Transition::Exit => "translateY(-20px)",
            Transition::Enter => "translateY(0)",
        }
    }
}

/// The region of the page the router owns and rewrites on every navigation.
pub trait Mount {
    fn content(&self) -> String;

    fn replace_content(&self, html: &str);

    fn transition(&self, transition: Transition);
}

pub trait DocumentTitle {
    fn title(&self) -> String;

    fn set_title(&self, title: &str);
}

/// The global "loading" indicator shown while a navigation is in flight.
pub trait LoadingOverlay {
    fn show(&self);

    fn hide(&self);

    fn is_visible(&self) -> bool;
}

/// A [`Mount`] backed by a string.
#[derive(Default)]
pub struct MemoryMount {
    content: RefCell<String>,
    transitions: RefCell<Vec<Transition>>,
    replacements: Cell<usize>,
}

impl MemoryMount {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(content.into()),
            ..Default::default()
        }
    }

    /// Every transition applied so far, in order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.borrow().clone()
    }

    /// How many times the content was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements.get()
    }
}

impl Mount for MemoryMount {
    fn content(&self) -> String {
        self.content.borrow().clone()
    }

    fn replace_content(&self, html: &str) {
        *self.content.borrow_mut() = html.to_string();
        self.replacements.set(self.replacements.get() + 1);
    }

    fn transition(&self, transition: Transition) {
        self.transitions.borrow_mut().push(transition);
    }
}

#[derive(Default)]
pub struct MemoryDocument {
    title: RefCell<String>,
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: RefCell::new(title.into()),
        }
    }
}

impl DocumentTitle for MemoryDocument {
    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }
}

/// A [`LoadingOverlay`] that counts how often it was shown and hidden.
#[derive(Default)]
pub struct MemoryOverlay {
    visible: Cell<bool>,
    shown: Cell<usize>,
    hidden: Cell<usize>,
}

impl MemoryOverlay {
    pub fn times_shown(&self) -> usize {
        self.shown.get()
    }

    pub fn times_hidden(&self) -> usize {
        self.hidden.get()
    }
}

impl LoadingOverlay for MemoryOverlay {
    fn show(&self) {
        self.visible.set(true);
        self.shown.set(self.shown.get() + 1);
    }

    fn hide(&self) {
        self.visible.set(false);
        self.hidden.set(self.hidden.get() + 1);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}
