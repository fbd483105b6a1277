//! A small `{{ key }}` template engine for shared page components.

use std::rc::Rc;

use futures_util::future::join_all;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, error};

use crate::{error::TemplateError, fetch::Fetcher};

/// The component templates the site ships, as `(name, url)` pairs.
pub const DEFAULT_COMPONENTS: [(&str, &str); 4] = [
    ("base", "components/base.html"),
    ("page-header", "components/page-header.html"),
    ("card", "components/card.html"),
    ("modal", "components/modal.html"),
];

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

/// Named templates with `{{ key }}` placeholders.
///
/// ```rust
/// # use pageswap_router::prelude::*;
/// # use std::rc::Rc;
/// let mut templates = TemplateProcessor::new(Rc::new(StaticFetcher::default()));
/// templates.register("greeting", "<h1>{{ title }}</h1>");
///
/// let html = templates.render("greeting", &serde_json::json!({ "title": "Home" })).unwrap();
/// assert_eq!(html, "<h1>Home</h1>");
/// ```
pub struct TemplateProcessor {
    fetcher: Rc<dyn Fetcher>,
    templates: FxHashMap<String, String>,
}

impl TemplateProcessor {
    pub fn new(fetcher: Rc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            templates: FxHashMap::default(),
        }
    }

    /// Register `template` under `name`, replacing any template already registered there.
    pub fn register(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(name.into(), template.into());
    }

    pub fn template(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    pub fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        Ok(Self::replace_variables(template, data))
    }

    /// Replace every `{{ key }}` in `template` with `data[key]`.
    ///
    /// Keys are ASCII word characters and may be padded with whitespace inside the braces. Missing
    /// keys render as nothing. Anything that doesn't form a complete placeholder is kept as-is.
    pub fn replace_variables(template: &str, data: &Value) -> String {
        PLACEHOLDER
            .replace_all(template, |placeholder: &Captures| {
                let mut value = String::new();
                if let Some(found) = data.get(&placeholder[1]) {
                    write_value(&mut value, found);
                }
                value
            })
            .into_owned()
    }

    /// Fetch a template and register it under `name`.
    pub async fn load_template(&mut self, name: &str, url: &str) -> Result<(), TemplateError> {
        let template = self.fetcher.fetch_text(url).await?;
        debug!(%name, %url, "loaded template");
        self.register(name, template);
        Ok(())
    }

    /// Fetch several templates at once. Failures are logged and skipped.
    ///
    /// Returns how many templates were registered.
    pub async fn load_components<'a, I>(&mut self, components: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fetcher = &self.fetcher;
        let fetched = join_all(components.into_iter().map(|(name, url)| async move {
            (name, url, fetcher.fetch_text(url).await)
        }))
        .await;

        let mut loaded = 0;
        for (name, url, result) in fetched {
            match result {
                Ok(template) => {
                    self.register(name, template);
                    loaded += 1;
                }
                Err(err) => error!("failed to load template `{name}` from {url}: {err}"),
            }
        }
        loaded
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::String(text) => out.push_str(text),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                if !item.is_null() {
                    write_value(out, item);
                }
            }
        }
        other => out.push_str(&other.to_string()),
    }
}
