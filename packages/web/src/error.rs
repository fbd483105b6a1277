use pageswap_router::error::RouteTableError;
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::util::js_message;

/// Failures while wiring the router into the page.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global `window` exists (pageswap cannot be run from a web worker)")]
    MissingWindow,

    #[error("`window` has no `document`")]
    MissingDocument,

    #[error("the document has no `{0}` element")]
    MissingElement(&'static str),

    #[error("javascript error: {0}")]
    Js(String),

    #[error(transparent)]
    RouteTable(#[from] RouteTableError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(js_message(&value))
    }
}
