use std::time::Duration;

use thiserror::Error;

/// An error retrieving a backing document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("request for `{file}` failed with status {status}")]
    Status { file: String, status: u16 },

    /// The request never produced a response.
    #[error("request for `{file}` failed: {message}")]
    Network { file: String, message: String },
}

/// Why a navigation could not display its page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("request for `{file}` did not finish within {after:?}")]
    Timeout { file: String, after: Duration },
}

/// A route table that cannot be used.
#[derive(Debug, Error)]
pub enum RouteTableError {
    /// Unknown paths resolve to `/`, so the table needs one.
    #[error("the route table has no entry for `/`")]
    MissingRoot,

    #[error("route path `{0}` must start with `/`")]
    InvalidPath(String),

    #[error("route `{0}` has an empty backing file")]
    EmptyFile(String),

    #[error("failed to parse route table: {0}")]
    Json(#[from] serde_json::Error),
}

/// A script or stylesheet that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("failed to load `{url}`: {reason}")]
    Failed { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template `{0}` is not registered")]
    NotFound(String),

    #[error("failed to load template: {0}")]
    Load(#[from] FetchError),

    #[error("template data could not be converted: {0}")]
    Data(#[from] serde_json::Error),
}
