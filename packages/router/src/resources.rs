//! Loading third-party scripts and stylesheets on demand.
//!
//! Page hooks pull in heavy libraries only on the pages that use them. The [`ResourceOptimizer`]
//! makes sure each one is injected at most once, no matter how many navigations ask for it.

use std::{cell::RefCell, fmt, rc::Rc};

use async_trait::async_trait;
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::error::ResourceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Script,
    Style,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Script => f.write_str("script"),
            ResourceKind::Style => f.write_str("stylesheet"),
        }
    }
}

/// Adds a resource to the document and waits for it to load.
#[async_trait(?Send)]
pub trait ResourceInjector {
    async fn inject(&self, kind: ResourceKind, url: &str) -> Result<(), ResourceError>;
}

type Load = Shared<LocalBoxFuture<'static, Result<(), ResourceError>>>;

/// Deduplicating loader for external scripts and stylesheets.
///
/// The first request for a url starts the load; every concurrent or later request for it waits
/// on that same load. A failed load is forgotten, so asking again retries it.
pub struct ResourceOptimizer {
    injector: Rc<dyn ResourceInjector>,
    loads: RefCell<FxHashMap<(ResourceKind, String), Load>>,
}

impl ResourceOptimizer {
    pub fn new(injector: Rc<dyn ResourceInjector>) -> Self {
        Self {
            injector,
            loads: RefCell::new(FxHashMap::default()),
        }
    }

    pub async fn load_script(&self, url: &str) -> Result<(), ResourceError> {
        self.load(ResourceKind::Script, url).await
    }

    pub async fn load_style(&self, url: &str) -> Result<(), ResourceError> {
        self.load(ResourceKind::Style, url).await
    }

    /// Load scripts one after another, for libraries that depend on the ones before them.
    ///
    /// Stops at the first failure.
    pub async fn load_scripts_in_order<I, S>(&self, urls: I) -> Result<(), ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for url in urls {
            self.load_script(url.as_ref()).await?;
        }
        Ok(())
    }

    /// Whether a script or stylesheet with this url has finished loading.
    pub fn is_loaded(&self, url: &str) -> bool {
        self.loads
            .borrow()
            .iter()
            .any(|((_, loaded), load)| loaded == url && matches!(load.peek(), Some(Ok(()))))
    }

    async fn load(&self, kind: ResourceKind, url: &str) -> Result<(), ResourceError> {
        let key = (kind, url.to_string());

        let load = self
            .loads
            .borrow_mut()
            .entry(key.clone())
            .or_insert_with(|| {
                debug!(%kind, %url, "injecting resource");
                let injector = self.injector.clone();
                let url = url.to_string();
                async move { injector.inject(kind, &url).await }
                    .boxed_local()
                    .shared()
            })
            .clone();

        let result = load.await;

        if let Err(err) = &result {
            let mut loads = self.loads.borrow_mut();
            // only the first waiter to see the failure clears it
            let failed = loads
                .get(&key)
                .is_some_and(|load| matches!(load.peek(), Some(Err(_))));
            if failed {
                warn!("{err}");
                loads.remove(&key);
            }
        }

        result
    }
}

/// A [`ResourceInjector`] that loads everything instantly, except urls marked as failing.
#[derive(Default)]
pub struct MemoryInjector {
    injected: RefCell<Vec<(ResourceKind, String)>>,
    failing: RefCell<FxHashSet<String>>,
}

impl MemoryInjector {
    /// Make every injection of `url` fail until [`recover`](Self::recover) is called.
    pub fn fail(&self, url: impl Into<String>) {
        self.failing.borrow_mut().insert(url.into());
    }

    pub fn recover(&self, url: &str) {
        self.failing.borrow_mut().remove(url);
    }

    /// Every injection attempted so far, in order.
    pub fn injected(&self) -> Vec<(ResourceKind, String)> {
        self.injected.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ResourceInjector for MemoryInjector {
    async fn inject(&self, kind: ResourceKind, url: &str) -> Result<(), ResourceError> {
        self.injected.borrow_mut().push((kind, url.to_string()));
        if self.failing.borrow().contains(url) {
            return Err(ResourceError::Failed {
                url: url.to_string(),
                reason: format!("{kind} refused to load"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    const THREE: &str = "https://cdn.jsdelivr.net/npm/three@0.134.0/build/three.min.js";
    const VANTA: &str = "https://cdn.jsdelivr.net/npm/vanta@latest/dist/vanta.globe.min.js";

    #[test]
    fn repeated_loads_inject_once() {
        let injector = Rc::new(MemoryInjector::default());
        let optimizer = ResourceOptimizer::new(injector.clone());

        block_on(async {
            optimizer.load_script(THREE).await.unwrap();
            optimizer.load_script(THREE).await.unwrap();
            optimizer.load_style("css/theme.css").await.unwrap();
        });

        assert_eq!(
            injector.injected(),
            [
                (ResourceKind::Script, THREE.to_string()),
                (ResourceKind::Style, "css/theme.css".to_string()),
            ]
        );
        assert!(optimizer.is_loaded(THREE));
        assert!(!optimizer.is_loaded(VANTA));
    }

    #[test]
    fn failed_loads_are_retried() {
        let injector = Rc::new(MemoryInjector::default());
        let optimizer = ResourceOptimizer::new(injector.clone());

        injector.fail(THREE);
        let err = block_on(optimizer.load_script(THREE)).unwrap_err();
        assert!(matches!(err, ResourceError::Failed { ref url, .. } if url == THREE));
        assert!(!optimizer.is_loaded(THREE));

        injector.recover(THREE);
        block_on(optimizer.load_script(THREE)).unwrap();
        assert!(optimizer.is_loaded(THREE));
        assert_eq!(injector.injected().len(), 2);
    }

    #[test]
    fn ordered_loads_stop_at_the_first_failure() {
        let injector = Rc::new(MemoryInjector::default());
        let optimizer = ResourceOptimizer::new(injector.clone());

        injector.fail(THREE);
        assert!(block_on(optimizer.load_scripts_in_order([THREE, VANTA])).is_err());
        assert_eq!(
            injector.injected(),
            [(ResourceKind::Script, THREE.to_string())]
        );
    }
}
