use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use futures_util::future::{join_all, select, Either};
use tracing::{debug, error, trace};

use crate::{
    cache::PageCache,
    error::NavigationError,
    extract::{FragmentExtractor, Page},
    fetch::Fetcher,
    history::{History, HistoryState},
    hooks::{PageContext, PageHook},
    navigation::{LinkAction, NavigationOutcome, NavigationState, NavigationToken, Navigations, Phase},
    notify::{Notifier, Severity},
    router_cfg::RouterConfig,
    routes::RouteTable,
    timer::Timer,
    view::{DocumentTitle, LoadingOverlay, Mount, Transition},
};

/// The host environment the router works against.
///
/// On the web every field is backed by `web-sys`; the in-memory implementations in this crate
/// stand in for them in tests and headless hosts.
#[derive(Clone)]
pub struct Platform {
    pub fetcher: Rc<dyn Fetcher>,
    pub timer: Rc<dyn Timer>,
    pub history: Rc<dyn History>,
    pub mount: Rc<dyn Mount>,
    pub document: Rc<dyn DocumentTitle>,
    pub overlay: Rc<dyn LoadingOverlay>,
    pub notifier: Rc<dyn Notifier>,
}

/// The core of the router.
///
/// This combines the [`RouteTable`], a [`PageCache`] and a [`Platform`] to turn a path into
/// displayed content: fetch the backing document (once per session), strip the page chrome, swap
/// the fragment into the mount with a transition, keep the title in sync, re-run the page hooks,
/// and record the navigation in the history.
///
/// Every method takes `&self`; share the router with `Rc` between event handlers. Navigations
/// are not queued, but only the most recent one may touch the page: an older navigation that
/// finishes late drops its swap, its error notification and its overlay update.
pub struct Router {
    cfg: RouterConfig,
    routes: RouteTable,
    extractor: FragmentExtractor,
    cache: RefCell<PageCache>,
    platform: Platform,
    hooks: Vec<Rc<dyn PageHook>>,
    navigations: Navigations,
}

impl Router {
    pub fn new(routes: RouteTable, platform: Platform) -> Self {
        Self::with_config(routes, platform, RouterConfig::default())
    }

    pub fn with_config(routes: RouteTable, platform: Platform, cfg: RouterConfig) -> Self {
        Self {
            extractor: FragmentExtractor::new(cfg.chrome.clone()),
            cfg,
            routes,
            cache: RefCell::new(PageCache::default()),
            platform,
            hooks: Vec::new(),
            navigations: Navigations::default(),
        }
    }

    /// Register a hook to run after every swap.
    pub fn with_hook(mut self, hook: impl PageHook + 'static) -> Self {
        self.hooks.push(Rc::new(hook));
        self
    }

    pub fn add_hook(&mut self, hook: Rc<dyn PageHook>) {
        self.hooks.push(hook);
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &RouterConfig {
        &self.cfg
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn cache(&self) -> Ref<'_, PageCache> {
        self.cache.borrow()
    }

    /// Decide what a click on a link with this `href` should do.
    ///
    /// Only exact route paths are routed; `#fragment` links scroll in place; everything else,
    /// external or not, is left to the browser.
    pub fn classify_link(&self, href: &str) -> LinkAction {
        if self.routes.contains(href) {
            LinkAction::Navigate(href.to_string())
        } else if let Some(id) = href.strip_prefix('#') {
            LinkAction::ScrollTo(id.to_string())
        } else {
            LinkAction::Native
        }
    }

    /// Display the page behind `path`.
    ///
    /// Unknown paths display the root route. When `push_state` is set, a history entry for the
    /// resolved path is pushed once the swap is applied. Failures are reported to the user through
    /// the notifier and never returned as errors; the outcome only says what happened.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn navigate_to(&self, path: &str, push_state: bool) -> NavigationOutcome {
        let state = self.begin(path, push_state);

        self.platform.overlay.show();
        trace!(phase = %Phase::Loading, file = %state.file);

        let outcome = match self.load_page(&state.file).await {
            Ok(page) => self.swap(&state, &page).await,
            Err(err) => self.fail(&state, err),
        };

        self.settle(state.token).await;
        outcome
    }

    /// Give the entry the page was loaded on a state of its own, so that moving back to it later
    /// restores its content like any entry the router pushed.
    pub fn adopt_current_entry(&self) {
        let path = self.platform.history.current_path();
        self.platform.history.replace(&HistoryState::new(path));
    }

    /// Restore the page of a history entry the user moved back or forward to.
    ///
    /// Entries the router didn't push carry no state and are ignored.
    pub async fn handle_pop(&self, state: Option<&HistoryState>) -> Option<NavigationOutcome> {
        let path = state
            .map(|state| state.path.as_str())
            .filter(|path| !path.is_empty())?;
        Some(self.navigate_to(path, false).await)
    }

    /// Wait for the host to go idle, then [`prefetch_pending`](Self::prefetch_pending).
    pub async fn prefetch_when_idle(&self) -> usize {
        self.platform
            .timer
            .idle(self.cfg.prefetch_fallback_delay)
            .await;
        self.prefetch_pending().await
    }

    /// Fetch and cache every backing file that isn't cached yet, except the one currently on
    /// screen. Failures are ignored. Returns how many pages were cached.
    pub async fn prefetch_pending(&self) -> usize {
        let current_path = self.platform.history.current_path();
        let active = self.routes.get(&current_path);

        let pending = {
            let cache = self.cache.borrow();
            self.routes
                .files()
                .into_iter()
                .filter(|file| !cache.has(file) && Some(*file) != active)
                .collect::<Vec<_>>()
        };

        if pending.is_empty() {
            return 0;
        }
        debug!(count = pending.len(), "prefetching pages");

        let cached = join_all(pending.into_iter().map(|file| async move {
            match self.fetch_page(file).await {
                Ok(_) => true,
                Err(err) => {
                    debug!(%file, "prefetch failed: {err}");
                    false
                }
            }
        }))
        .await;

        cached.into_iter().filter(|cached| *cached).count()
    }

    fn begin(&self, path: &str, push_state: bool) -> NavigationState {
        let route = self.routes.resolve(path);
        NavigationState {
            path: route.path.to_string(),
            file: route.file.to_string(),
            push_state,
            token: self.navigations.begin(),
        }
    }

    async fn load_page(&self, file: &str) -> Result<Rc<Page>, NavigationError> {
        let cached = self.cache.borrow().get(file);
        match cached {
            Some(page) => {
                debug!(%file, "serving page from cache");
                Ok(page)
            }
            None => self.fetch_page(file).await,
        }
    }

    async fn fetch_page(&self, file: &str) -> Result<Rc<Page>, NavigationError> {
        trace!(phase = %Phase::Fetching, %file);
        let raw = self.fetch_document(file).await?;

        trace!(phase = %Phase::Extracting, %file);
        let page = self.extractor.extract(&raw);
        Ok(self.cache.borrow_mut().set(file, page))
    }

    async fn fetch_document(&self, file: &str) -> Result<String, NavigationError> {
        let fetch = self.platform.fetcher.fetch_text(file);

        let Some(limit) = self.cfg.fetch_timeout else {
            return Ok(fetch.await?);
        };

        match select(fetch, self.platform.timer.sleep(limit)).await {
            Either::Left((result, _)) => Ok(result?),
            Either::Right(_) => Err(NavigationError::Timeout {
                file: file.to_string(),
                after: limit,
            }),
        }
    }

    async fn swap(&self, state: &NavigationState, page: &Page) -> NavigationOutcome {
        if !self.navigations.is_current(state.token) {
            return superseded(state);
        }

        trace!(phase = %Phase::Transitioning, path = %state.path);
        let mount = &self.platform.mount;
        mount.transition(Transition::Exit);
        self.platform.timer.sleep(self.cfg.transition_delay).await;

        if !self.navigations.is_current(state.token) {
            return superseded(state);
        }

        mount.replace_content(&page.fragment);
        if let Some(title) = &page.title {
            self.platform.document.set_title(title);
        }

        let context = PageContext {
            path: &state.path,
            file: &state.file,
            title: page.title.as_deref(),
        };
        for hook in &self.hooks {
            hook.after_swap(&context);
        }

        mount.transition(Transition::Enter);

        if state.push_state {
            self.platform
                .history
                .push(&HistoryState::new(state.path.clone()));
        }

        NavigationOutcome::Completed
    }

    fn fail(&self, state: &NavigationState, err: NavigationError) -> NavigationOutcome {
        if !self.navigations.is_current(state.token) {
            debug!(path = %state.path, "dropping failure of a superseded navigation: {err}");
            return NavigationOutcome::Superseded;
        }

        error!(phase = %Phase::Error, path = %state.path, "navigation failed: {err}");
        // an earlier, superseded navigation may have left the mount faded out
        self.platform.mount.transition(Transition::Enter);
        self.platform
            .notifier
            .notify(&self.cfg.error_message, Severity::Error);
        NavigationOutcome::Failed(err)
    }

    /// Hide the overlay once the navigation has settled, unless a newer one owns it by then.
    async fn settle(&self, token: NavigationToken) {
        if !self.navigations.is_current(token) {
            return;
        }

        self.platform
            .timer
            .sleep(self.cfg.overlay_hide_delay)
            .await;

        if self.navigations.is_current(token) {
            self.platform.overlay.hide();
            trace!(phase = %Phase::Idle);
        }
    }
}

fn superseded(state: &NavigationState) -> NavigationOutcome {
    debug!(path = %state.path, "navigation superseded, discarding its swap");
    NavigationOutcome::Superseded
}
