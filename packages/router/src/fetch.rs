use std::cell::RefCell;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::error::FetchError;

/// Retrieves backing documents as text.
///
/// Non-success responses and network failures are the only errors; anything the server sends with
/// a success status is handed back as-is.
#[async_trait(?Send)]
pub trait Fetcher {
    async fn fetch_text(&self, file: &str) -> Result<String, FetchError>;
}

/// A [`Fetcher`] that serves documents from memory and counts every request.
///
/// Files it doesn't know answer with a 404.
#[derive(Default)]
pub struct StaticFetcher {
    documents: RefCell<FxHashMap<String, Result<String, FetchError>>>,
    requests: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new<I, F, D>(documents: I) -> Self
    where
        I: IntoIterator<Item = (F, D)>,
        F: Into<String>,
        D: Into<String>,
    {
        let fetcher = Self::default();
        for (file, document) in documents {
            fetcher.insert(file, document);
        }
        fetcher
    }

    pub fn insert(&self, file: impl Into<String>, document: impl Into<String>) {
        self.documents
            .borrow_mut()
            .insert(file.into(), Ok(document.into()));
    }

    /// Make every request for `file` fail with `error`.
    pub fn fail(&self, file: impl Into<String>, error: FetchError) {
        self.documents.borrow_mut().insert(file.into(), Err(error));
    }

    /// How many times `file` was requested.
    pub fn requests(&self, file: &str) -> usize {
        self.requests.borrow().iter().filter(|f| *f == file).count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Fetcher for StaticFetcher {
    async fn fetch_text(&self, file: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(file.to_string());
        self.documents
            .borrow()
            .get(file)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Status {
                    file: file.to_string(),
                    status: 404,
                })
            })
    }
}
