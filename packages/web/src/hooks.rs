//! The per-page initialization the site's pages rely on.

use std::{cell::RefCell, rc::Rc};

use js_sys::Array;
use pageswap_router::{
    hooks::{PageContext, PageHook},
    resources::ResourceOptimizer,
    routes::ROOT_PATH,
};
use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::{
    util::{call_method, global, js_message},
    WebError,
};

/// Turn `<i data-feather>` placeholders into inline icons.
pub struct IconReplace;

impl IconReplace {
    /// Run `feather.replace()` if the icon library is on the page.
    pub fn replace_icons() {
        let Some(feather) = global("feather") else {
            return;
        };
        if let Err(err) = call_method(&feather, "replace", &[]) {
            warn!("feather.replace() failed: {}", js_message(&err));
        }
    }
}

impl PageHook for IconReplace {
    fn after_swap(&self, _page: &PageContext<'_>) {
        Self::replace_icons();
    }
}

/// Fade `.fade-in-element` nodes in once they scroll into view.
pub struct RevealOnScroll {
    document: Document,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl RevealOnScroll {
    pub const SELECTOR: &'static str = ".fade-in-element";

    pub fn new(document: Document) -> Result<Self, WebError> {
        let callback = Closure::<dyn FnMut(Array)>::new(|entries: Array| {
            for entry in entries.iter() {
                let entry = entry.unchecked_into::<IntersectionObserverEntry>();
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1("fade-in");
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(0.1));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            document,
            observer,
            _callback: callback,
        })
    }

    /// Start watching every matching element currently in the document.
    pub fn observe_all(&self) {
        let Ok(elements) = self.document.query_selector_all(Self::SELECTOR) else {
            return;
        };
        for element in (0..elements.length()).filter_map(|idx| elements.item(idx)) {
            if let Ok(element) = element.dyn_into::<web_sys::Element>() {
                self.observer.observe(&element);
            }
        }
    }
}

impl PageHook for RevealOnScroll {
    fn after_swap(&self, _page: &PageContext<'_>) {
        self.observe_all();
    }
}

impl Drop for RevealOnScroll {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub const THREE_URL: &str = "https://cdn.jsdelivr.net/npm/three@0.134.0/build/three.min.js";
pub const VANTA_GLOBE_URL: &str =
    "https://cdn.jsdelivr.net/npm/vanta@latest/dist/vanta.globe.min.js";

/// The options the homepage globe is drawn with.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GlobeOptions {
    pub el: String,
    pub mouse_controls: bool,
    pub touch_controls: bool,
    pub gyro_controls: bool,
    pub min_height: f64,
    pub min_width: f64,
    pub scale: f64,
    pub scale_mobile: f64,
    pub color: u32,
    pub color2: u32,
    pub background_color: u32,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            el: format!("#{}", GlobeBackground::ELEMENT_ID),
            mouse_controls: true,
            touch_controls: true,
            gyro_controls: false,
            min_height: 200.0,
            min_width: 200.0,
            scale: 1.0,
            scale_mobile: 1.0,
            color: 0x3b82f6,
            color2: 0x8b5cf6,
            background_color: 0x000000,
        }
    }
}

/// The animated globe behind the homepage hero.
///
/// three.js and vanta are only loaded the first time the homepage is shown.
pub struct GlobeBackground {
    inner: Rc<GlobeInner>,
}

struct GlobeInner {
    document: Document,
    resources: Rc<ResourceOptimizer>,
    options: GlobeOptions,
    effect: RefCell<Option<JsValue>>,
}

impl GlobeBackground {
    pub const ELEMENT_ID: &'static str = "globe-background";

    pub fn new(document: Document, resources: Rc<ResourceOptimizer>) -> Self {
        Self::with_options(document, resources, GlobeOptions::default())
    }

    pub fn with_options(
        document: Document,
        resources: Rc<ResourceOptimizer>,
        options: GlobeOptions,
    ) -> Self {
        Self {
            inner: Rc::new(GlobeInner {
                document,
                resources,
                options,
                effect: RefCell::new(None),
            }),
        }
    }
}

impl GlobeInner {
    fn has_target(&self) -> bool {
        self.document
            .get_element_by_id(GlobeBackground::ELEMENT_ID)
            .is_some()
    }

    /// Draw the globe, replacing the one left over from an earlier visit.
    fn draw(&self, vanta: &JsValue) {
        if let Some(previous) = self.effect.borrow_mut().take() {
            let _ = call_method(&previous, "destroy", &[]);
        }

        let options = match serde_wasm_bindgen::to_value(&self.options) {
            Ok(options) => options,
            Err(err) => {
                warn!("failed to serialize the globe options: {err}");
                return;
            }
        };

        match call_method(vanta, "GLOBE", &[options]) {
            Ok(effect) => *self.effect.borrow_mut() = Some(effect),
            Err(err) => warn!("VANTA.GLOBE failed: {}", js_message(&err)),
        }
    }
}

impl PageHook for GlobeBackground {
    fn after_swap(&self, page: &PageContext<'_>) {
        if page.path != ROOT_PATH || !self.inner.has_target() {
            return;
        }

        if let Some(vanta) = global("VANTA") {
            self.inner.draw(&vanta);
            return;
        }

        let inner = self.inner.clone();
        spawn_local(async move {
            debug!("loading the globe libraries");
            if let Err(err) = inner
                .resources
                .load_scripts_in_order([THREE_URL, VANTA_GLOBE_URL])
                .await
            {
                warn!("globe background unavailable: {err}");
                return;
            }

            // the user may have navigated away while the libraries loaded
            if let (true, Some(vanta)) = (inner.has_target(), global("VANTA")) {
                inner.draw(&vanta);
            }
        });
    }
}
