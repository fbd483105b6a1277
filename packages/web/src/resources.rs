use std::{cell::RefCell, rc::Rc};

use async_trait::async_trait;
use futures_channel::oneshot;
use gloo::events::EventListener;
use pageswap_router::{
    error::ResourceError,
    resources::{ResourceInjector, ResourceKind},
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::util::js_message;

/// Injects `<script>` and `<link rel="stylesheet">` elements into `<head>`.
///
/// A matching element that is already in the document counts as loaded, so libraries the page
/// includes itself are never loaded twice.
pub struct DomResourceInjector {
    document: Document,
}

impl DomResourceInjector {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn existing(&self, kind: ResourceKind, url: &str) -> Option<Element> {
        let (selector, attribute) = match kind {
            ResourceKind::Script => ("script[src]", "src"),
            ResourceKind::Style => ("link[rel='stylesheet'][href]", "href"),
        };

        let found = self.document.query_selector_all(selector).ok()?;
        (0..found.length())
            .filter_map(|idx| found.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .find(|element| element.get_attribute(attribute).as_deref() == Some(url))
    }

    fn create(&self, kind: ResourceKind, url: &str) -> Result<Element, wasm_bindgen::JsValue> {
        let element = match kind {
            ResourceKind::Script => {
                let script = self.document.create_element("script")?;
                script.set_attribute("src", url)?;
                script
            }
            ResourceKind::Style => {
                let link = self.document.create_element("link")?;
                link.set_attribute("rel", "stylesheet")?;
                link.set_attribute("href", url)?;
                link
            }
        };
        Ok(element)
    }
}

#[async_trait(?Send)]
impl ResourceInjector for DomResourceInjector {
    async fn inject(&self, kind: ResourceKind, url: &str) -> Result<(), ResourceError> {
        if self.existing(kind, url).is_some() {
            tracing::debug!(%url, "{kind} is already part of the document");
            return Ok(());
        }

        let failed = |reason: String| ResourceError::Failed {
            url: url.to_string(),
            reason,
        };

        let element = self
            .create(kind, url)
            .map_err(|err| failed(js_message(&err)))?;

        let (sender, receiver) = oneshot::channel();
        let sender = Rc::new(RefCell::new(Some(sender)));
        let settle = |loaded: bool| {
            let sender = sender.clone();
            move |_: &web_sys::Event| {
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(loaded);
                }
            }
        };
        let _on_load = EventListener::once(&element, "load", settle(true));
        let _on_error = EventListener::once(&element, "error", settle(false));

        let head = self
            .document
            .head()
            .ok_or_else(|| failed("the document has no <head>".to_string()))?;
        head.append_child(&element)
            .map_err(|err| failed(js_message(&err)))?;

        match receiver.await {
            Ok(true) => Ok(()),
            outcome => {
                // drop the dead element so a retry injects a fresh one
                element.remove();
                let reason = match outcome {
                    Ok(_) => format!("the {kind} failed to load"),
                    Err(_) => format!("the {kind} was never loaded"),
                };
                Err(failed(reason))
            }
        }
    }
}
