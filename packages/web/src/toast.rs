use gloo_timers::callback::Timeout;
use pageswap_router::notify::{Notifier, Severity};
use tracing::error;
use web_sys::{Document, Element};

use crate::util::js_message;

const VISIBLE_MS: u32 = 3_000;
const SLIDE_OUT_MS: u32 = 300;

/// A [`Notifier`] that slides a toast in at the bottom right corner.
///
/// Toasts stay for three seconds, then slide out and are removed from the document.
pub struct WebToaster {
    document: Document,
}

impl WebToaster {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn toast(&self, message: &str, severity: Severity) -> Result<Element, wasm_bindgen::JsValue> {
        let background = match severity {
            Severity::Success => "bg-green-500",
            Severity::Error => "bg-red-500",
            Severity::Warning => "bg-yellow-500",
            Severity::Info => "bg-blue-500",
        };

        let toast = self.document.create_element("div")?;
        toast.set_class_name(&format!(
            "fixed bottom-4 right-4 px-6 py-4 rounded-lg shadow-lg z-50 transform transition-transform duration-300 {background}"
        ));
        toast.set_attribute("role", "status")?;
        toast.set_attribute("data-severity", severity.as_str())?;
        toast.set_text_content(Some(message));

        if let Some(body) = self.document.body() {
            body.append_child(&toast)?;
        }
        Ok(toast)
    }
}

impl Notifier for WebToaster {
    fn notify(&self, message: &str, severity: Severity) {
        let toast = match self.toast(message, severity) {
            Ok(toast) => toast,
            Err(err) => {
                error!("failed to show `{message}`: {}", js_message(&err));
                return;
            }
        };

        Timeout::new(VISIBLE_MS, move || {
            let _ = toast.class_list().add_1("translate-x-full");
            Timeout::new(SLIDE_OUT_MS, move || toast.remove()).forget();
        })
        .forget();
    }
}
