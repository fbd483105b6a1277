//! The static mapping of logical paths to backing documents.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::RouteTableError;

/// The path every unknown route resolves to.
pub const ROOT_PATH: &str = "/";

/// A route resolved from the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route<'a> {
    pub path: &'a str,
    pub file: &'a str,
}

/// Maps paths such as `/mirrors.html` to the document that backs them.
///
/// The table always contains [`ROOT_PATH`] and is immutable once built.
///
/// ```rust
/// # use pageswap_router::prelude::*;
/// let routes = RouteTable::new([("/", "home.html"), ("/about.html", "about.html")]).unwrap();
/// assert_eq!(routes.resolve("/about.html").file, "about.html");
/// assert_eq!(routes.resolve("/missing").path, "/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
    root_file: String,
}

impl RouteTable {
    /// Build a table from `(path, file)` pairs.
    pub fn new<I, P, F>(routes: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (P, F)>,
        P: Into<String>,
        F: Into<String>,
    {
        let routes = routes
            .into_iter()
            .map(|(path, file)| (path.into(), file.into()))
            .collect::<BTreeMap<_, _>>();
        Self::try_from(routes)
    }

    /// Parse a table from a JSON object of `"path": "file"` entries.
    pub fn from_json(json: &str) -> Result<Self, RouteTableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The backing file of `path`, without falling back to the root.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Resolve `path`, falling back to the root route for paths the table doesn't know.
    pub fn resolve(&self, path: &str) -> Route<'_> {
        match self.routes.get_key_value(path) {
            Some((path, file)) => Route { path, file },
            None => {
                tracing::trace!(%path, "unknown route, falling back to `/`");
                self.root()
            }
        }
    }

    pub fn root(&self) -> Route<'_> {
        Route {
            path: ROOT_PATH,
            file: &self.root_file,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Route<'_>> {
        self.routes
            .iter()
            .map(|(path, file)| Route { path, file })
    }

    /// Every distinct backing file. Several paths may share one file.
    pub fn files(&self) -> BTreeSet<&str> {
        self.routes.values().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    /// The site's own pages.
    fn default() -> Self {
        let routes = [
            ("/", "index.html"),
            ("/mirrors.html", "mirrors.html"),
            ("/tools.html", "tools.html"),
            ("/community.html", "community.html"),
        ]
        .into_iter()
        .map(|(path, file)| (path.to_string(), file.to_string()))
        .collect();

        Self {
            routes,
            root_file: "index.html".to_string(),
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for RouteTable {
    type Error = RouteTableError;

    fn try_from(routes: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if let Some((path, _)) = routes.iter().find(|(path, _)| !path.starts_with('/')) {
            return Err(RouteTableError::InvalidPath(path.clone()));
        }
        if let Some((path, _)) = routes.iter().find(|(_, file)| file.trim().is_empty()) {
            return Err(RouteTableError::EmptyFile(path.clone()));
        }
        let root_file = routes
            .get(ROOT_PATH)
            .cloned()
            .ok_or(RouteTableError::MissingRoot)?;

        Ok(Self { routes, root_file })
    }
}

impl From<RouteTable> for BTreeMap<String, String> {
    fn from(table: RouteTable) -> Self {
        table.routes
    }
}
