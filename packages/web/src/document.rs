//! The DOM side of a swap: the mount point, the title, the loading overlay and the styles that
//! animate them.

use std::cell::Cell;

use pageswap_router::{
    extract::ChromeRules,
    view::{DocumentTitle, LoadingOverlay, Mount, Transition},
};
use tracing::{debug, error};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::{util::js_message, WebError};

const STYLE_ID: &str = "router-styles";

const OVERLAY_CLASS: &str = "fixed inset-0 bg-black/50 backdrop-blur-sm z-40 flex items-center justify-center opacity-0 pointer-events-none transition-opacity duration-300";

const OVERLAY_HTML: &str = r#"
    <div class="bg-gray-800 rounded-lg p-6 flex items-center space-x-3">
        <div class="animate-spin rounded-full h-6 w-6 border-2 border-blue-500 border-t-transparent"></div>
        <span class="text-white">載入中...</span>
    </div>
"#;

/// Install the transition and reveal styles, once per document.
pub(crate) fn install_router_styles(document: &Document, chrome: &ChromeRules) -> Result<(), WebError> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(&format!(
        "body > :not({header}):not({footer}) {{
    transition: opacity 0.3s ease, transform 0.3s ease;
    opacity: 1;
    transform: translateY(0);
}}
.fade-in-element {{
    opacity: 0;
    transform: translateY(20px);
    transition: opacity 0.6s ease, transform 0.6s ease;
}}
.fade-in-element.fade-in {{
    opacity: 1;
    transform: translateY(0);
}}",
        header = chrome.header(),
        footer = chrome.footer(),
    )));

    document
        .head()
        .ok_or(WebError::MissingElement("head"))?
        .append_child(&style)?;
    Ok(())
}

/// The element the router swaps pages into.
pub struct WebMount {
    element: HtmlElement,
}

impl WebMount {
    /// Use the element matching `selector`.
    ///
    /// Pages without one get a `<main>` holding everything between the header and the footer.
    pub fn find_or_create(
        document: &Document,
        selector: &str,
        chrome: &ChromeRules,
    ) -> Result<Self, WebError> {
        if let Some(element) = document.query_selector(selector)? {
            let element = element.dyn_into::<HtmlElement>().map_err(|_| {
                WebError::Js(format!("mount point `{selector}` is not an html element"))
            })?;
            return Ok(Self { element });
        }

        debug!("no `{selector}` element, wrapping the content between the chrome");
        let body = document.body().ok_or(WebError::MissingElement("body"))?;
        let main = document
            .create_element("main")?
            .unchecked_into::<HtmlElement>();

        let children = body.children();
        let children = (0..children.length())
            .filter_map(|idx| children.item(idx))
            .collect::<Vec<Element>>();

        let is = |element: &Element, tag: &str| element.tag_name().eq_ignore_ascii_case(tag);

        let mut inside = false;
        let mut footer = None;
        for child in children {
            if is(&child, chrome.header()) {
                inside = true;
                continue;
            }
            if is(&child, chrome.footer()) {
                footer = Some(child);
                break;
            }
            if inside {
                main.append_child(&child)?;
            }
        }

        body.insert_before(&main, footer.as_deref())?;
        Ok(Self { element: main })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl Mount for WebMount {
    fn content(&self) -> String {
        self.element.inner_html()
    }

    fn replace_content(&self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn transition(&self, transition: Transition) {
        let style = self.element.style();
        let applied = style
            .set_property("opacity", transition.opacity())
            .and_then(|_| style.set_property("transform", transition.transform()));
        if let Err(err) = applied {
            error!("failed to apply {transition:?} transition: {}", js_message(&err));
        }
    }
}

pub struct WebDocumentTitle {
    document: Document,
}

impl WebDocumentTitle {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl DocumentTitle for WebDocumentTitle {
    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }
}

/// A full-screen spinner faded in over the page while a navigation is in flight.
pub struct WebOverlay {
    element: HtmlElement,
    visible: Cell<bool>,
}

impl WebOverlay {
    pub fn new(document: &Document) -> Result<Self, WebError> {
        let element = document
            .create_element("div")?
            .unchecked_into::<HtmlElement>();
        element.set_class_name(OVERLAY_CLASS);
        element.set_inner_html(OVERLAY_HTML);

        document
            .body()
            .ok_or(WebError::MissingElement("body"))?
            .append_child(&element)?;

        Ok(Self {
            element,
            visible: Cell::new(false),
        })
    }

    fn set_visible(&self, visible: bool) {
        let (opacity, pointer_events) = if visible { ("1", "auto") } else { ("0", "none") };
        let style = self.element.style();
        let applied = style
            .set_property("opacity", opacity)
            .and_then(|_| style.set_property("pointer-events", pointer_events));
        if let Err(err) = applied {
            error!("failed to update the loading overlay: {}", js_message(&err));
        }
        self.visible.set(visible);
    }
}

impl LoadingOverlay for WebOverlay {
    fn show(&self) {
        self.set_visible(true);
    }

    fn hide(&self) {
        self.set_visible(false);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }
}
