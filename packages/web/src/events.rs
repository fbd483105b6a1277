//! Document-level listeners: link interception, back/forward, and the navbar scroll state.

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use pageswap_router::{navigation::LinkAction, Router};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, MouseEvent, PopStateEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::history::WebHistory;

/// Past this many pixels of scroll the navbar gets its `scrolled` class.
const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// Route clicks on links to known pages through the router, and scroll `#fragment` links smoothly.
pub(crate) fn intercept_links(document: &Document, router: Rc<Router>) -> EventListener {
    let options = EventListenerOptions::enable_prevent_default();

    EventListener::new_with_options(document, "click", options, move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        if event.default_prevented() || is_modified(event) {
            return;
        }

        let Some(link) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest("a[href]").ok().flatten())
        else {
            return;
        };
        if opens_elsewhere(&link) {
            return;
        }
        let Some(href) = link.get_attribute("href") else {
            return;
        };

        match router.classify_link(&href) {
            LinkAction::Navigate(path) => {
                event.prevent_default();
                let router = router.clone();
                spawn_local(async move {
                    router.navigate_to(&path, true).await;
                });
            }
            LinkAction::ScrollTo(id) => {
                event.prevent_default();
                scroll_to(&link, &id);
            }
            LinkAction::Native => {}
        }
    })
}

/// Ctrl/cmd/shift/alt clicks and non-primary buttons open tabs and windows; leave them alone.
fn is_modified(event: &MouseEvent) -> bool {
    event.button() != 0 || event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key()
}

fn opens_elsewhere(link: &Element) -> bool {
    let target = link
        .get_attribute("target")
        .is_some_and(|target| !target.is_empty() && target != "_self");
    target || link.has_attribute("download")
}

fn scroll_to(link: &Element, id: &str) {
    let Some(target) = link
        .owner_document()
        .and_then(|document| document.get_element_by_id(id))
    else {
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Restore pages when the user moves through the history.
pub(crate) fn restore_on_pop(window: &Window, router: Rc<Router>) -> EventListener {
    EventListener::new(window, "popstate", move |event| {
        let state = event
            .dyn_ref::<PopStateEvent>()
            .and_then(WebHistory::state_of);

        let router = router.clone();
        spawn_local(async move {
            router.handle_pop(state.as_ref()).await;
        });
    })
}

/// Toggle `scrolled` on the navbar once the page is scrolled down.
pub(crate) fn track_navbar_scroll(window: &Window, navbar_tag: &str) -> EventListener {
    let navbar_tag = navbar_tag.to_string();
    let w = window.clone();

    EventListener::new(window, "scroll", move |_| {
        let Some(navbar) = w
            .document()
            .and_then(|document| document.query_selector(&navbar_tag).ok().flatten())
        else {
            return;
        };
        let scrolled = w.scroll_y().unwrap_or_default() > NAVBAR_SCROLL_THRESHOLD;
        let _ = navbar
            .class_list()
            .toggle_with_force("scrolled", scrolled);
    })
}
