use std::time::Duration;

use crate::extract::ChromeRules;

/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust
/// # use pageswap_router::prelude::*;
/// # use std::time::Duration;
/// let cfg = RouterConfig::default()
///     .transition_delay(Duration::from_millis(200))
///     .fetch_timeout(None)
///     .error_message("Page failed to load");
/// ```
#[derive(Clone, Debug)]
pub struct RouterConfig {
    pub(crate) transition_delay: Duration,
    pub(crate) overlay_hide_delay: Duration,
    pub(crate) prefetch_fallback_delay: Duration,
    pub(crate) fetch_timeout: Option<Duration>,
    pub(crate) error_message: String,
    pub(crate) chrome: ChromeRules,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            transition_delay: Duration::from_millis(150),
            overlay_hide_delay: Duration::from_millis(50),
            prefetch_fallback_delay: Duration::from_secs(2),
            fetch_timeout: Some(Duration::from_secs(10)),
            error_message: "頁面載入失敗".to_string(),
            chrome: ChromeRules::default(),
        }
    }
}

impl RouterConfig {
    /// How long the exit transition runs before the content is replaced.
    ///
    /// Defaults to 150ms.
    pub fn transition_delay(self, delay: Duration) -> Self {
        Self {
            transition_delay: delay,
            ..self
        }
    }

    /// How long the loading overlay lingers after a navigation has settled.
    ///
    /// Defaults to 50ms.
    pub fn overlay_hide_delay(self, delay: Duration) -> Self {
        Self {
            overlay_hide_delay: delay,
            ..self
        }
    }

    /// How long prefetching waits on hosts that can't report idle time.
    ///
    /// Defaults to 2s.
    pub fn prefetch_fallback_delay(self, delay: Duration) -> Self {
        Self {
            prefetch_fallback_delay: delay,
            ..self
        }
    }

    /// Give up on a document request after this long. `None` waits forever, which leaves the
    /// loading overlay up if a request hangs.
    ///
    /// Defaults to 10s.
    pub fn fetch_timeout(self, timeout: Option<Duration>) -> Self {
        Self {
            fetch_timeout: timeout,
            ..self
        }
    }

    /// The message shown when a navigation fails.
    pub fn error_message(self, message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            ..self
        }
    }

    /// What counts as page chrome when extracting fragments.
    pub fn chrome(self, chrome: ChromeRules) -> Self {
        Self { chrome, ..self }
    }

    pub fn chrome_rules(&self) -> &ChromeRules {
        &self.chrome
    }
}
