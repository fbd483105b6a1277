use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::extract::Page;

/// Extracted pages, keyed by backing file.
///
/// Entries live as long as the cache: there is no expiry, size bound or removal. A page fetched
/// once is served from memory for the rest of the session, even if the server copy changes.
#[derive(Default)]
pub struct PageCache {
    pages: FxHashMap<String, Rc<Page>>,
}

impl PageCache {
    pub fn get(&self, file: &str) -> Option<Rc<Page>> {
        self.pages.get(file).cloned()
    }

    /// Store `page` under `file`, replacing any previous entry, and hand back the shared copy.
    pub fn set(&mut self, file: impl Into<String>, page: Page) -> Rc<Page> {
        let page = Rc::new(page);
        self.pages.insert(file.into(), page.clone());
        page
    }

    pub fn has(&self, file: &str) -> bool {
        self.pages.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
