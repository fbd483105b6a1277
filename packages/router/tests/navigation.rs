use std::{cell::RefCell, rc::Rc, time::Duration};

use futures::executor::block_on;
use pageswap_router::prelude::*;
use pretty_assertions::assert_eq;

mod common;
use common::*;

#[test]
fn known_paths_display_their_fragment() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    let outcome = block_on(router.navigate_to("/mirrors.html", true));

    assert_eq!(outcome, NavigationOutcome::Completed);
    assert_eq!(harness.mount.content(), fragment("<h1>Mirrors</h1>"));
    assert_eq!(harness.document.title(), "鏡像站");
    assert_eq!(
        harness.mount.transitions(),
        [Transition::Exit, Transition::Enter]
    );
    assert!(!harness.overlay.is_visible());
    assert_eq!(harness.overlay.times_shown(), 1);
    assert_eq!(harness.overlay.times_hidden(), 1);
}

#[test]
fn home_page_scenario() {
    let harness = Harness::new(StaticFetcher::new([(
        "home.html",
        "<html><head><title>Home</title></head><body><custom-navbar></custom-navbar><h1>Welcome</h1><custom-footer></custom-footer></body></html>",
    )]));
    let routes = RouteTable::new([("/", "home.html"), ("/about.html", "about.html")]).unwrap();
    let router = harness.router_with(routes, RouterConfig::default());

    block_on(router.navigate_to("/", true));

    assert_eq!(harness.mount.content(), "<h1>Welcome</h1>");
    assert_eq!(harness.document.title(), "Home");
}

#[test]
fn unknown_paths_display_the_root() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    block_on(router.navigate_to("/does-not-exist.html", true));
    let unknown = harness.mount.content();

    block_on(router.navigate_to("/", true));

    assert_eq!(unknown, fragment("<h1>Home</h1>"));
    assert_eq!(harness.mount.content(), unknown);
    assert_eq!(
        harness.history.entries(),
        [HistoryState::new("/"), HistoryState::new("/")]
    );
    assert_eq!(harness.fetcher.requests("index.html"), 1);
}

#[test]
fn documents_are_fetched_once() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    block_on(async {
        router.navigate_to("/tools.html", true).await;
        router.navigate_to("/community.html", true).await;
        router.navigate_to("/tools.html", true).await;
    });

    assert_eq!(harness.fetcher.requests("tools.html"), 1);
    assert_eq!(harness.fetcher.total_requests(), 2);
    assert_eq!(harness.mount.content(), fragment("<h1>Tools</h1>"));
    assert_eq!(harness.mount.replacements(), 3);
    assert!(router.cache().has("community.html"));
}

#[test]
fn aliased_paths_share_a_cache_entry() {
    let harness = Harness::new(site_fetcher());
    let routes = RouteTable::new([("/", "index.html"), ("/index.html", "index.html")]).unwrap();
    let router = harness.router_with(routes, RouterConfig::default());

    block_on(async {
        router.navigate_to("/", true).await;
        router.navigate_to("/index.html", true).await;
    });

    assert_eq!(harness.fetcher.requests("index.html"), 1);
    assert_eq!(router.cache().len(), 1);
}

#[test]
fn history_is_pushed_only_when_asked() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    block_on(router.navigate_to("/tools.html", false));
    assert!(harness.history.entries().is_empty());
    assert_eq!(harness.history.current_path(), "/");

    block_on(router.navigate_to("/tools.html", true));
    assert_eq!(
        harness.history.entries(),
        [HistoryState::new("/tools.html")]
    );
    assert_eq!(harness.history.current_path(), "/tools.html");
}

#[test]
fn failed_fetches_leave_the_content_alone() {
    let harness = Harness::new(site_fetcher());
    harness.fetcher.fail(
        "mirrors.html",
        FetchError::Status {
            file: "mirrors.html".into(),
            status: 500,
        },
    );
    let router = harness.router();

    let outcome = block_on(router.navigate_to("/mirrors.html", true));

    assert!(matches!(
        outcome,
        NavigationOutcome::Failed(NavigationError::Fetch(FetchError::Status { status: 500, .. }))
    ));
    assert_eq!(harness.mount.content(), "<p>initial</p>");
    assert_eq!(harness.mount.replacements(), 0);
    assert_eq!(harness.document.title(), "initial");
    assert!(harness.history.entries().is_empty());
    assert_eq!(
        harness.notifications.entries(),
        [Notification {
            message: "頁面載入失敗".into(),
            severity: Severity::Error,
        }]
    );
    assert!(!harness.overlay.is_visible());
    assert!(!router.cache().has("mirrors.html"));
}

#[test]
fn failures_use_the_configured_message() {
    let harness = Harness::new(StaticFetcher::default());
    let router = harness.router_with(
        RouteTable::default(),
        RouterConfig::default().error_message("Page failed to load"),
    );

    block_on(router.navigate_to("/", true));

    assert_eq!(harness.notifications.count(Severity::Error), 1);
    assert_eq!(
        harness.notifications.entries()[0].message,
        "Page failed to load"
    );
}

#[test]
fn hung_fetches_time_out() {
    let harness = Harness::new(GatedFetcher::default());
    let _held = harness.fetcher.gate("tools.html");
    let router = harness.router_with(
        RouteTable::default(),
        RouterConfig::default().fetch_timeout(Some(Duration::from_secs(3))),
    );

    let outcome = block_on(router.navigate_to("/tools.html", true));

    assert_eq!(
        outcome,
        NavigationOutcome::Failed(NavigationError::Timeout {
            file: "tools.html".into(),
            after: Duration::from_secs(3),
        })
    );
    assert_eq!(harness.notifications.count(Severity::Error), 1);
    assert!(!harness.overlay.is_visible());
}

#[test]
fn documents_without_a_body_are_used_whole() {
    let raw = "<section><h2>Partial</h2></section>";
    let harness = Harness::new(StaticFetcher::new([("index.html", raw)]));
    let router = harness.router();

    block_on(router.navigate_to("/", false));

    assert_eq!(harness.mount.content(), raw);
    assert_eq!(router.cache().get("index.html").unwrap().title, None);
    // no title, so the old one stays
    assert_eq!(harness.document.title(), "initial");
}

#[test]
fn delays_follow_the_config() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router_with(
        RouteTable::default(),
        RouterConfig::default()
            .transition_delay(Duration::from_millis(300))
            .overlay_hide_delay(Duration::from_millis(10)),
    );

    block_on(router.navigate_to("/", true));

    assert_eq!(
        harness.timer.slept(),
        [Duration::from_millis(300), Duration::from_millis(10)]
    );
}

#[test]
fn hooks_run_between_swap_and_enter() {
    let harness = Harness::new(site_fetcher());
    let seen = Rc::new(RefCell::new(Vec::new()));

    let router = harness.router().with_hook({
        let seen = seen.clone();
        let mount = harness.mount.clone();
        move |page: &PageContext<'_>| {
            seen.borrow_mut().push((
                page.path.to_string(),
                page.file.to_string(),
                page.title.map(str::to_string),
                mount.content(),
                mount.transitions().last().copied(),
            ));
        }
    });

    block_on(router.navigate_to("/nowhere", true));

    assert_eq!(
        seen.borrow().as_slice(),
        [(
            "/".to_string(),
            "index.html".to_string(),
            Some("首頁".to_string()),
            fragment("<h1>Home</h1>"),
            Some(Transition::Exit),
        )]
    );
}

#[test]
fn popped_entries_are_restored_without_pushing() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    block_on(async {
        router.navigate_to("/tools.html", true).await;
        router.navigate_to("/mirrors.html", true).await;
    });

    let popped = harness.history.go_back();
    let outcome = block_on(router.handle_pop(popped.as_ref()));

    assert_eq!(outcome, Some(NavigationOutcome::Completed));
    assert_eq!(harness.mount.content(), fragment("<h1>Tools</h1>"));
    assert_eq!(harness.history.entries(), [HistoryState::new("/tools.html")]);
    assert_eq!(harness.history.current_path(), "/tools.html");
}

#[test]
fn the_landing_entry_is_restored_after_being_adopted() {
    let harness = Harness::new(site_fetcher());
    let history = Rc::new(MemoryHistory::with_initial_path("/tools.html"));
    let router = Router::new(
        RouteTable::default(),
        Platform {
            history: history.clone(),
            ..harness.platform()
        },
    );

    router.adopt_current_entry();
    block_on(router.navigate_to("/mirrors.html", true));
    assert_eq!(harness.mount.content(), fragment("<h1>Mirrors</h1>"));

    let popped = history.go_back();
    assert_eq!(popped, Some(HistoryState::new("/tools.html")));
    assert_eq!(
        block_on(router.handle_pop(popped.as_ref())),
        Some(NavigationOutcome::Completed)
    );
    assert_eq!(harness.mount.content(), fragment("<h1>Tools</h1>"));
    assert_eq!(history.current_path(), "/tools.html");
}

#[test]
fn pops_without_state_are_ignored() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    assert_eq!(block_on(router.handle_pop(None)), None);
    assert_eq!(block_on(router.handle_pop(Some(&HistoryState::new("")))), None);
    assert_eq!(harness.fetcher.total_requests(), 0);
    assert_eq!(harness.overlay.times_shown(), 0);
}

#[test]
fn links_are_classified() {
    let harness = Harness::new(site_fetcher());
    let router = harness.router();

    assert_eq!(
        router.classify_link("/tools.html"),
        LinkAction::Navigate("/tools.html".into())
    );
    assert_eq!(
        router.classify_link("#faq"),
        LinkAction::ScrollTo("faq".into())
    );
    assert_eq!(router.classify_link("tools.html"), LinkAction::Native);
    assert_eq!(router.classify_link("/tools.html#top"), LinkAction::Native);
    assert_eq!(
        router.classify_link("https://github.com/"),
        LinkAction::Native
    );
}
