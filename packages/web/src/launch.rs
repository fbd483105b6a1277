use std::rc::Rc;

use gloo::events::EventListener;
use pageswap_router::{
    fetch::Fetcher,
    resources::ResourceOptimizer,
    template::TemplateProcessor,
    Platform, Router,
};
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::{
    document::install_router_styles,
    events, DomResourceInjector, GlobeBackground, IconReplace, RevealOnScroll, WebConfig,
    WebDocumentTitle, WebError, WebFetcher, WebHistory, WebMount, WebOverlay, WebTimer,
    WebToaster,
};

/// A running router and the listeners that feed it.
///
/// Dropping the handle removes the listeners; call [`forget`](Self::forget) to keep the router
/// running for the lifetime of the page.
pub struct RouterHandle {
    router: Rc<Router>,
    fetcher: Rc<dyn Fetcher>,
    resources: Rc<ResourceOptimizer>,
    listeners: Vec<EventListener>,
}

impl RouterHandle {
    pub fn router(&self) -> &Rc<Router> {
        &self.router
    }

    /// The shared script and stylesheet loader.
    pub fn resources(&self) -> &Rc<ResourceOptimizer> {
        &self.resources
    }

    /// A template processor that loads templates the same way pages are fetched.
    pub fn templates(&self) -> TemplateProcessor {
        TemplateProcessor::new(self.fetcher.clone())
    }

    /// Navigate to `path` in the background, as if a link to it was clicked.
    pub fn navigate(&self, path: &str) {
        let router = self.router.clone();
        let path = path.to_string();
        spawn_local(async move {
            router.navigate_to(&path, true).await;
        });
    }

    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

/// Take over navigation for the current page.
///
/// This finds (or creates) the mount point, installs the loading overlay and the transition
/// styles, starts listening for link clicks and history changes, and schedules the idle-time
/// prefetch.
pub fn launch(mut cfg: WebConfig) -> Result<RouterHandle, WebError> {
    if let Some(level) = cfg.log_level {
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::default()
                .set_max_level(level)
                .build(),
        );
    }

    let window = web_sys::window().ok_or(WebError::MissingWindow)?;
    let document = window.document().ok_or(WebError::MissingDocument)?;

    let routes = cfg.take_route_table(&document)?;
    let chrome = cfg.router.chrome_rules().clone();

    install_router_styles(&document, &chrome)?;
    let mount = WebMount::find_or_create(&document, &cfg.mount_selector, &chrome)?;
    let overlay = WebOverlay::new(&document)?;

    let fetcher: Rc<dyn Fetcher> = Rc::new(WebFetcher::new(window.clone()));
    let platform = Platform {
        fetcher: fetcher.clone(),
        timer: Rc::new(WebTimer::new(window.clone())),
        history: Rc::new(WebHistory::new(window.clone())?),
        mount: Rc::new(mount),
        document: Rc::new(WebDocumentTitle::new(document.clone())),
        overlay: Rc::new(overlay),
        notifier: Rc::new(WebToaster::new(document.clone())),
    };

    let resources = Rc::new(ResourceOptimizer::new(Rc::new(DomResourceInjector::new(
        document.clone(),
    ))));

    let mut router = Router::with_config(routes, platform, cfg.router);
    if cfg.default_hooks {
        let reveal = RevealOnScroll::new(document.clone())?;
        // the first page was rendered by the browser, not swapped in
        reveal.observe_all();

        router.add_hook(Rc::new(IconReplace));
        router.add_hook(Rc::new(reveal));
        router.add_hook(Rc::new(GlobeBackground::new(
            document.clone(),
            resources.clone(),
        )));
    }
    for hook in cfg.hooks {
        router.add_hook(hook);
    }
    let router = Rc::new(router);
    router.adopt_current_entry();

    let listeners = vec![
        events::intercept_links(&document, router.clone()),
        events::restore_on_pop(&window, router.clone()),
        events::track_navbar_scroll(&window, chrome.header()),
    ];

    if cfg.prefetch {
        let router = router.clone();
        spawn_local(async move {
            let cached = router.prefetch_when_idle().await;
            debug!(cached, "prefetch finished");
        });
    }

    debug!(routes = router.routes().len(), "router ready");
    Ok(RouterHandle {
        router,
        fetcher,
        resources,
        listeners,
    })
}
