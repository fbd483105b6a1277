#![doc = include_str!("../README.md")]

//! # Quick start
//!
//! ```rust, ignore
//! use pageswap_web::WebConfig;
//!
//! #[wasm_bindgen(start)]
//! pub fn start() {
//!     if let Ok(handle) = pageswap_web::launch(WebConfig::new()) {
//!         handle.forget();
//!     }
//! }
//! ```

mod cfg;
mod document;
mod error;
mod events;
mod fetch;
mod history;
mod hooks;
mod launch;
mod resources;
mod ric_raf;
mod template;
mod toast;
mod util;

pub use cfg::WebConfig;
pub use document::{WebDocumentTitle, WebMount, WebOverlay};
pub use error::WebError;
pub use fetch::WebFetcher;
pub use history::WebHistory;
pub use hooks::{GlobeBackground, GlobeOptions, IconReplace, RevealOnScroll, THREE_URL, VANTA_GLOBE_URL};
pub use launch::{launch, RouterHandle};
pub use resources::DomResourceInjector;
pub use ric_raf::WebTimer;
pub use template::render_page;
pub use toast::WebToaster;

pub use pageswap_router as router;
