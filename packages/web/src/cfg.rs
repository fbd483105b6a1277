use std::rc::Rc;

use pageswap_router::{hooks::PageHook, routes::RouteTable, RouterConfig};
use tracing::Level;
use web_sys::Document;

use crate::WebError;

/// Configuration for [`launch`](crate::launch).
///
/// # Example
///
/// ```rust, ignore
/// pageswap_web::launch(
///     WebConfig::new()
///         .mount_selector("#content")
///         .log_level(tracing::Level::DEBUG),
/// )?;
/// ```
pub struct WebConfig {
    pub(crate) routes: Option<RouteTable>,
    pub(crate) routes_element_id: String,
    pub(crate) mount_selector: String,
    pub(crate) router: RouterConfig,
    pub(crate) prefetch: bool,
    pub(crate) default_hooks: bool,
    pub(crate) hooks: Vec<Rc<dyn PageHook>>,
    pub(crate) log_level: Option<Level>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            routes: None,
            routes_element_id: "pageswap-routes".to_string(),
            mount_selector: "main".to_string(),
            router: RouterConfig::default(),
            prefetch: true,
            default_hooks: true,
            hooks: Vec::new(),
            log_level: None,
        }
    }
}

impl WebConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this route table instead of reading one from the page.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = Some(routes);
        self
    }

    /// The id of the `<script type="application/json">` element holding the route table.
    ///
    /// Defaults to `pageswap-routes`. Pages without one use the default site routes.
    pub fn routes_element_id(mut self, id: impl Into<String>) -> Self {
        self.routes_element_id = id.into();
        self
    }

    /// The css selector of the element the router owns.
    ///
    /// Defaults to `main`.
    pub fn mount_selector(mut self, selector: impl Into<String>) -> Self {
        self.mount_selector = selector.into();
        self
    }

    pub fn router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    /// Prefetch every route once the browser is idle. On by default.
    pub fn prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// Install the icon, scroll-reveal and homepage globe hooks. On by default.
    pub fn default_hooks(mut self, enabled: bool) -> Self {
        self.default_hooks = enabled;
        self
    }

    /// Run `hook` after every swap, after the default hooks.
    pub fn with_hook(mut self, hook: impl PageHook + 'static) -> Self {
        self.hooks.push(Rc::new(hook));
        self
    }

    /// Send `tracing` output at or above `level` to the browser console.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = Some(level);
        self
    }

    pub(crate) fn take_route_table(&mut self, document: &Document) -> Result<RouteTable, WebError> {
        if let Some(routes) = self.routes.take() {
            return Ok(routes);
        }

        let embedded = document
            .get_element_by_id(&self.routes_element_id)
            .and_then(|element| element.text_content());

        match embedded {
            Some(json) => Ok(RouteTable::from_json(&json)?),
            None => Ok(RouteTable::default()),
        }
    }
}
