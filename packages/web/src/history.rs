use pageswap_router::history::{History, HistoryState};
use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::{PopStateEvent, Window};

use crate::{util::js_message, WebError};

/// A [`History`] that integrates with a browser via the
/// [History API](https://developer.mozilla.org/en-US/docs/Web/API/History_API).
///
/// Entries pushed by the router carry a `{ path }` state object, which is handed back with the
/// `popstate` event when the user moves through the history.
pub struct WebHistory {
    window: Window,
    history: web_sys::History,
}

impl WebHistory {
    pub fn new(window: Window) -> Result<Self, WebError> {
        let history = window.history()?;
        Ok(Self { window, history })
    }

    /// The router state stored with the entry a `popstate` event moved to, if it has one.
    pub fn state_of(event: &PopStateEvent) -> Option<HistoryState> {
        serde_wasm_bindgen::from_value(event.state()).ok()
    }
}

fn state_value(state: &HistoryState) -> JsValue {
    serde_wasm_bindgen::to_value(state).unwrap_or_else(|err| {
        error!("failed to serialize history state: {err}");
        JsValue::NULL
    })
}

impl History for WebHistory {
    fn push(&self, state: &HistoryState) {
        if let Err(err) = self
            .history
            .push_state_with_url(&state_value(state), "", Some(&state.path))
        {
            error!("failed to push state: {}", js_message(&err));
        }
    }

    fn replace(&self, state: &HistoryState) {
        if let Err(err) = self
            .history
            .replace_state_with_url(&state_value(state), "", Some(&state.path))
        {
            error!("failed to replace state: {}", js_message(&err));
        }
    }

    fn current_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| String::from("/"))
    }
}
