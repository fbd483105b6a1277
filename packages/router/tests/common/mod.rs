#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc, time::Duration};

use async_trait::async_trait;
use futures::channel::oneshot;
use pageswap_router::prelude::*;
use rustc_hash::FxHashMap;

/// Wrap `main` in the chrome every page of the site carries.
pub fn site_page(title: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <script src="components/navbar.js"></script>
</head>
<body class="bg-gray-900 text-white">
<custom-navbar></custom-navbar>
<main>{main}</main>
<custom-footer></custom-footer>
<script src="components/footer.js"></script>
<script src="script.js"></script>
<script>feather.replace();</script>
</body>
</html>"#
    )
}

/// The fragment [`site_page`] extracts to.
pub fn fragment(main: &str) -> String {
    format!("\n\n<main>{main}</main>\n\n\n\n\n")
}

pub fn site_fetcher() -> StaticFetcher {
    StaticFetcher::new([
        ("index.html", site_page("首頁", "<h1>Home</h1>")),
        ("mirrors.html", site_page("鏡像站", "<h1>Mirrors</h1>")),
        ("tools.html", site_page("工具", "<h1>Tools</h1>")),
        ("community.html", site_page("社群", "<h1>Community</h1>")),
    ])
}

/// In-memory versions of every platform service, kept around so tests can inspect them.
pub struct Harness<F = StaticFetcher> {
    pub fetcher: Rc<F>,
    pub timer: Rc<ImmediateTimer>,
    pub history: Rc<MemoryHistory>,
    pub mount: Rc<MemoryMount>,
    pub document: Rc<MemoryDocument>,
    pub overlay: Rc<MemoryOverlay>,
    pub notifications: Rc<NotificationLog>,
}

impl<F: Fetcher + 'static> Harness<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
            timer: Rc::new(ImmediateTimer::default()),
            history: Rc::new(MemoryHistory::default()),
            mount: Rc::new(MemoryMount::new("<p>initial</p>")),
            document: Rc::new(MemoryDocument::new("initial")),
            overlay: Rc::new(MemoryOverlay::default()),
            notifications: Rc::new(NotificationLog::default()),
        }
    }

    pub fn platform(&self) -> Platform {
        Platform {
            fetcher: self.fetcher.clone(),
            timer: self.timer.clone(),
            history: self.history.clone(),
            mount: self.mount.clone(),
            document: self.document.clone(),
            overlay: self.overlay.clone(),
            notifier: self.notifications.clone(),
        }
    }

    /// A router over the four site routes.
    pub fn router(&self) -> Router {
        Router::new(RouteTable::default(), self.platform())
    }

    pub fn router_with(&self, routes: RouteTable, cfg: RouterConfig) -> Router {
        Router::with_config(routes, self.platform(), cfg)
    }
}

/// A [`Fetcher`] whose responses are released by hand.
#[derive(Default)]
pub struct GatedFetcher {
    gates: RefCell<FxHashMap<String, oneshot::Receiver<Result<String, FetchError>>>>,
}

impl GatedFetcher {
    /// Hold the next request for `file` until the returned sender fires.
    pub fn gate(&self, file: &str) -> oneshot::Sender<Result<String, FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(file.to_string(), rx);
        tx
    }
}

#[async_trait(?Send)]
impl Fetcher for GatedFetcher {
    async fn fetch_text(&self, file: &str) -> Result<String, FetchError> {
        let gate = self.gates.borrow_mut().remove(file);
        let Some(gate) = gate else {
            return Err(FetchError::Status {
                file: file.to_string(),
                status: 404,
            });
        };

        gate.await.unwrap_or_else(|_| {
            Err(FetchError::Network {
                file: file.to_string(),
                message: "gate dropped".to_string(),
            })
        })
    }
}

/// A [`Timer`] that holds every sleep of one duration until [`release`](Self::release) is called.
/// Other sleeps complete immediately.
pub struct GatedTimer {
    held: Duration,
    waiting: RefCell<Vec<oneshot::Sender<()>>>,
}

impl GatedTimer {
    pub fn new(held: Duration) -> Self {
        Self {
            held,
            waiting: RefCell::default(),
        }
    }

    pub fn pending(&self) -> usize {
        self.waiting.borrow().len()
    }

    /// Wake every held sleep, oldest first.
    pub fn release(&self) {
        for waiter in self.waiting.borrow_mut().drain(..) {
            let _ = waiter.send(());
        }
    }
}

#[async_trait(?Send)]
impl Timer for GatedTimer {
    async fn sleep(&self, duration: Duration) {
        if duration != self.held {
            return;
        }

        let (tx, rx) = oneshot::channel();
        self.waiting.borrow_mut().push(tx);
        let _ = rx.await;
    }
}
