//! Turning a fetched document into the fragment that goes into the mount point.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// The displayable part of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// The document's body with the persistent chrome removed.
    pub fragment: String,
    /// The text of the document's `<title>`, if it has a non-empty one.
    pub title: Option<String>,
}

/// Which parts of a document belong to the persistent page chrome.
///
/// The chrome stays on screen across navigations, so copies of it inside a fetched document must
/// never be swapped into the mount point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromeRules {
    pub(crate) header_tag: String,
    pub(crate) footer_tag: String,
    pub(crate) loader_scripts: Vec<String>,
    pub(crate) icon_call: String,
}

impl Default for ChromeRules {
    fn default() -> Self {
        Self {
            header_tag: "custom-navbar".to_string(),
            footer_tag: "custom-footer".to_string(),
            loader_scripts: vec![
                "components/navbar.js".to_string(),
                "components/footer.js".to_string(),
                "script.js".to_string(),
            ],
            icon_call: "feather.replace()".to_string(),
        }
    }
}

impl ChromeRules {
    /// The custom element that renders the persistent header.
    ///
    /// Defaults to `custom-navbar`.
    pub fn header_tag(self, tag: impl Into<String>) -> Self {
        Self {
            header_tag: tag.into(),
            ..self
        }
    }

    /// The custom element that renders the persistent footer.
    ///
    /// Defaults to `custom-footer`.
    pub fn footer_tag(self, tag: impl Into<String>) -> Self {
        Self {
            footer_tag: tag.into(),
            ..self
        }
    }

    /// Scripts (by `src`) that load the chrome itself and are already running on the page.
    ///
    /// Defaults to `components/navbar.js`, `components/footer.js` and `script.js`.
    pub fn loader_scripts<I, S>(self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loader_scripts: scripts.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// The icon library call that inline scripts repeat on every page.
    ///
    /// Defaults to `feather.replace()`.
    pub fn icon_call(self, call: impl Into<String>) -> Self {
        Self {
            icon_call: call.into(),
            ..self
        }
    }

    pub fn header(&self) -> &str {
        &self.header_tag
    }

    pub fn footer(&self) -> &str {
        &self.footer_tag
    }

    fn is_loader_script(&self, src: &str) -> bool {
        let src = src.split(['?', '#']).next().unwrap_or_default();
        let src = src.trim_start_matches("./").trim_start_matches('/');
        self.loader_scripts.iter().any(|loader| loader == src)
    }

    fn is_icon_call(&self, body: &str) -> bool {
        let statement = body.trim().trim_end_matches(';').trim_end();
        !statement.is_empty() && statement == self.icon_call
    }
}

/// Extracts [`Page`]s from raw documents.
///
/// Extraction isolates the `<body>` content and then removes, in order:
/// 1. the header element and everything inside it,
/// 2. the footer element and everything inside it,
/// 3. `<script src>` tags that load the chrome,
/// 4. inline scripts that only re-run the icon library.
///
/// Documents without a body fall back to the whole text, still cleaned.
#[derive(Clone, Debug, Default)]
pub struct FragmentExtractor {
    rules: ChromeRules,
}

static BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<body(?:[\s/][^<>]*)?>(.*?)</body\s*>").unwrap());
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title(?:\s[^<>]*)?>(.*?)</title\s*>").unwrap());

// attribute text never contains `<`, so a stray `<` in body text can't open a tag that swallows
// the markup after it
static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)(?:[\s/][^<>]*)?>").unwrap());
static CLOSE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</([A-Za-z][A-Za-z0-9-]*)\s*>").unwrap());

static SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script((?:[\s/][^<>]*)?)>(.*?)</script\s*>").unwrap()
});
static SRC_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'<>`=]+))"#).unwrap()
});

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z]{2,8});").unwrap()
});

impl FragmentExtractor {
    pub fn new(rules: ChromeRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ChromeRules {
        &self.rules
    }

    pub fn extract(&self, raw: &str) -> Page {
        let region = match BODY.captures(raw).and_then(|body| body.get(1)) {
            Some(body) => body.as_str(),
            None => {
                tracing::debug!("document has no body region, using the whole document");
                raw
            }
        };

        Page {
            fragment: self.clean(region),
            title: title(raw),
        }
    }

    /// Strip the chrome from a region of markup.
    pub fn clean(&self, region: &str) -> String {
        let rules = &self.rules;

        let region = remove_elements(region, &rules.header_tag);
        let region = remove_elements(&region, &rules.footer_tag);
        let region = SCRIPT.replace_all(&region, |script: &Captures| {
            let chrome = match script_src(&script[1]) {
                Some(src) => rules.is_loader_script(src),
                None => rules.is_icon_call(&script[2]),
            };
            if chrome {
                String::new()
            } else {
                script[0].to_string()
            }
        });
        region.into_owned()
    }
}

/// Remove every `tag` element, start tag through matching end tag, from `src`.
///
/// Self-closing tags are removed on their own. Start tags that are never closed are kept.
fn remove_elements(src: &str, tag: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut from = 0;

    while let Some(open) = OPEN_TAG.captures_at(src, from) {
        let Some(start) = open.get(0) else { break };
        from = start.end();
        if !open[1].eq_ignore_ascii_case(tag) {
            continue;
        }

        let end = if start.as_str().ends_with("/>") {
            start.end()
        } else {
            let close = CLOSE_TAG
                .captures_iter(&src[start.end()..])
                .find(|close| close[1].eq_ignore_ascii_case(tag))
                .and_then(|close| close.get(0));
            match close {
                Some(close) => start.end() + close.end(),
                None => continue,
            }
        };

        out.push_str(&src[copied..start.start()]);
        copied = end;
        from = end;
    }

    out.push_str(&src[copied..]);
    out
}

fn script_src(attrs: &str) -> Option<&str> {
    let src = SRC_ATTR.captures(attrs)?;
    (1..=3).find_map(|group| src.get(group)).map(|value| value.as_str())
}

/// The decoded, trimmed text of the first `<title>` element. Empty titles count as missing.
fn title(src: &str) -> Option<String> {
    let title = TITLE.captures(src)?.get(1)?;
    let text = decode_entities(title.as_str().trim());
    (!text.is_empty()).then(|| text.into_owned())
}

/// Decode the handful of character references that show up in page titles.
fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |entity: &Captures| {
        let name = &entity[1];
        let decoded = match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(ch) => ch.to_string(),
            None => entity[0].to_string(),
        }
    })
}
