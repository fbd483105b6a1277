//! Timers and the `requestIdleCallback` wait.

use std::time::Duration;

use async_trait::async_trait;
use futures_channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use pageswap_router::timer::Timer;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::Window;

use crate::util::{js_message, millis};

/// A [`Timer`] backed by `setTimeout` and `requestIdleCallback`.
pub struct WebTimer {
    window: Window,
}

impl WebTimer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Safari still ships without `requestIdleCallback`.
    fn supports_idle_callback(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("requestIdleCallback")).unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl Timer for WebTimer {
    async fn sleep(&self, duration: Duration) {
        TimeoutFuture::new(millis(duration)).await;
    }

    async fn idle(&self, fallback: Duration) {
        if !self.supports_idle_callback() {
            tracing::debug!("requestIdleCallback is unavailable, waiting {fallback:?} instead");
            return self.sleep(fallback).await;
        }

        let (sender, receiver) = oneshot::channel();
        let callback = Closure::once(move |_deadline: JsValue| {
            let _ = sender.send(());
        });

        match self
            .window
            .request_idle_callback(callback.as_ref().unchecked_ref())
        {
            Ok(_) => {
                let _ = receiver.await;
            }
            Err(err) => {
                tracing::warn!("requestIdleCallback failed: {}", js_message(&err));
                self.sleep(fallback).await;
            }
        }
    }
}
