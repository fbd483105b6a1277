//! Overlapping navigations: only the latest one may touch the page.

use std::{cell::RefCell, rc::Rc, time::Duration};

use futures::{executor::LocalPool, task::LocalSpawnExt};
use pageswap_router::prelude::*;
use pretty_assertions::assert_eq;

mod common;
use common::*;

type Outcomes = Rc<RefCell<Vec<(&'static str, NavigationOutcome)>>>;

fn spawn_navigation(pool: &LocalPool, router: &Rc<Router>, outcomes: &Outcomes, path: &'static str) {
    let router = router.clone();
    let outcomes = outcomes.clone();
    pool.spawner()
        .spawn_local(async move {
            let outcome = router.navigate_to(path, true).await;
            outcomes.borrow_mut().push((path, outcome));
        })
        .unwrap();
}

fn gated_router(harness: &Harness<GatedFetcher>) -> Rc<Router> {
    // the gates stand in for slow responses, so nothing should time out
    Rc::new(harness.router_with(
        RouteTable::default(),
        RouterConfig::default().fetch_timeout(None),
    ))
}

#[test]
fn late_responses_never_reach_the_page() {
    let harness = Harness::new(GatedFetcher::default());
    let slow = harness.fetcher.gate("mirrors.html");
    let fast = harness.fetcher.gate("tools.html");
    let router = gated_router(&harness);
    let outcomes = Outcomes::default();
    let mut pool = LocalPool::new();

    spawn_navigation(&pool, &router, &outcomes, "/mirrors.html");
    pool.run_until_stalled();
    spawn_navigation(&pool, &router, &outcomes, "/tools.html");
    pool.run_until_stalled();
    assert!(harness.overlay.is_visible());

    fast.send(Ok(site_page("工具", "<h1>Tools</h1>"))).unwrap();
    pool.run_until_stalled();
    assert_eq!(harness.mount.content(), fragment("<h1>Tools</h1>"));
    assert!(!harness.overlay.is_visible());

    slow.send(Ok(site_page("鏡像站", "<h1>Mirrors</h1>"))).unwrap();
    pool.run_until_stalled();

    assert_eq!(
        outcomes.borrow().as_slice(),
        [
            ("/tools.html", NavigationOutcome::Completed),
            ("/mirrors.html", NavigationOutcome::Superseded),
        ]
    );
    assert_eq!(harness.mount.content(), fragment("<h1>Tools</h1>"));
    assert_eq!(harness.document.title(), "工具");
    assert_eq!(harness.mount.replacements(), 1);
    assert_eq!(harness.history.entries(), [HistoryState::new("/tools.html")]);
    assert_eq!(harness.overlay.times_shown(), 2);
    assert_eq!(harness.overlay.times_hidden(), 1);

    // the late page is still worth keeping
    assert!(router.cache().has("mirrors.html"));
}

#[test]
fn superseded_failures_stay_quiet() {
    let harness = Harness::new(GatedFetcher::default());
    let slow = harness.fetcher.gate("community.html");
    let fast = harness.fetcher.gate("index.html");
    let router = gated_router(&harness);
    let outcomes = Outcomes::default();
    let mut pool = LocalPool::new();

    spawn_navigation(&pool, &router, &outcomes, "/community.html");
    pool.run_until_stalled();
    spawn_navigation(&pool, &router, &outcomes, "/");
    pool.run_until_stalled();

    fast.send(Ok(site_page("首頁", "<h1>Home</h1>"))).unwrap();
    slow.send(Err(FetchError::Status {
        file: "community.html".into(),
        status: 503,
    }))
    .unwrap();
    pool.run_until_stalled();

    assert!(harness.notifications.entries().is_empty());
    assert_eq!(harness.mount.content(), fragment("<h1>Home</h1>"));
    assert!(!harness.overlay.is_visible());
    assert!(outcomes
        .borrow()
        .contains(&("/community.html", NavigationOutcome::Superseded)));
}

#[test]
fn the_latest_failure_is_reported() {
    let harness = Harness::new(GatedFetcher::default());
    let first = harness.fetcher.gate("tools.html");
    let second = harness.fetcher.gate("mirrors.html");
    let router = gated_router(&harness);
    let outcomes = Outcomes::default();
    let mut pool = LocalPool::new();

    spawn_navigation(&pool, &router, &outcomes, "/tools.html");
    pool.run_until_stalled();
    spawn_navigation(&pool, &router, &outcomes, "/mirrors.html");
    pool.run_until_stalled();

    first
        .send(Ok(site_page("工具", "<h1>Tools</h1>")))
        .unwrap();
    pool.run_until_stalled();
    // the older navigation finished first, but it's no longer the one on screen
    assert_eq!(harness.mount.content(), "<p>initial</p>");
    assert!(harness.overlay.is_visible());

    drop(second);
    pool.run_until_stalled();

    assert_eq!(harness.notifications.count(Severity::Error), 1);
    assert_eq!(harness.mount.content(), "<p>initial</p>");
    assert!(!harness.overlay.is_visible());
    assert_eq!(harness.mount.transitions().last(), Some(&Transition::Enter));
}

#[test]
fn navigations_overtaken_during_the_exit_transition_are_dropped() {
    let harness = Harness::new(site_fetcher());
    let transition = Duration::from_millis(150);
    let timer = Rc::new(GatedTimer::new(transition));
    let platform = Platform {
        timer: timer.clone(),
        ..harness.platform()
    };
    let router = Rc::new(Router::with_config(
        RouteTable::default(),
        platform,
        RouterConfig::default()
            .transition_delay(transition)
            .fetch_timeout(None),
    ));
    let outcomes = Outcomes::default();
    let mut pool = LocalPool::new();

    spawn_navigation(&pool, &router, &outcomes, "/mirrors.html");
    pool.run_until_stalled();
    spawn_navigation(&pool, &router, &outcomes, "/tools.html");
    pool.run_until_stalled();

    // both pages are fetched and faded out, neither is swapped in yet
    assert_eq!(timer.pending(), 2);
    assert_eq!(
        harness.mount.transitions(),
        [Transition::Exit, Transition::Exit]
    );
    assert_eq!(harness.mount.content(), "<p>initial</p>");

    timer.release();
    pool.run_until_stalled();

    assert_eq!(
        outcomes.borrow().as_slice(),
        [
            ("/mirrors.html", NavigationOutcome::Superseded),
            ("/tools.html", NavigationOutcome::Completed),
        ]
    );
    assert_eq!(harness.mount.content(), fragment("<h1>Tools</h1>"));
    assert_eq!(harness.mount.replacements(), 1);
    assert_eq!(harness.document.title(), "工具");
    assert_eq!(harness.history.entries(), [HistoryState::new("/tools.html")]);
    assert!(!harness.overlay.is_visible());
}
