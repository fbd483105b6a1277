use async_trait::async_trait;
use pageswap_router::{error::FetchError, fetch::Fetcher};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::util::js_message;

/// Fetches backing documents with `window.fetch`, relative to the current page.
pub struct WebFetcher {
    window: Window,
}

impl WebFetcher {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Fetcher for WebFetcher {
    async fn fetch_text(&self, file: &str) -> Result<String, FetchError> {
        let network = |err: JsValue| FetchError::Network {
            file: file.to_string(),
            message: js_message(&err),
        };

        let response: Response = JsFuture::from(self.window.fetch_with_str(file))
            .await
            .map_err(network)?
            .unchecked_into();

        if !response.ok() {
            return Err(FetchError::Status {
                file: file.to_string(),
                status: response.status(),
            });
        }

        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?;
        Ok(text.as_string().unwrap_or_default())
    }
}
