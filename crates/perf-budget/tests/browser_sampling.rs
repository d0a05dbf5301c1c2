//! Sampling a real page in headless Chromium
//!
//! Pages are served as `data:` URLs, so no server is needed. Skipped when
//! Chrome cannot be launched or `PERF_BUDGET_SKIP_BROWSER` is set.
//!
//! Run with: cargo test -p perf-budget --test browser_sampling

#[path = "common/browser.rs"]
mod browser;

use perf_budget::metrics::{ChromiumSession, PageSession};
use perf_budget::SampleError;

const CONTENT_PAGE: &str =
    "data:text/html,<html><body><h1>Quarterly report</h1><p>Revenue is up.</p></body></html>";

const LOGIN_PAGE: &str =
    "data:text/html,<html><body><h1>Sign in</h1><input type=email placeholder=email></body></html>";

#[tokio::test]
async fn test_cold_and_warm_samples() {
    skip_without_chrome!();
    let Some((browser, _handle)) = browser::require_browser().await else {
        return;
    };

    let page = browser.new_page("about:blank").await.expect("Should create page");
    let mut session = ChromiumSession::new(page);

    session.reset(true).await.expect("Should reset cold");
    let cold = session.sample(CONTENT_PAGE, 0).await.expect("Should sample cold");
    session.reset(false).await.expect("Should reset warm");
    let warm = session.sample(CONTENT_PAGE, 1).await.expect("Should sample warm");

    eprintln!("cold sample: {:?}", cold);
    assert_eq!(cold.run_label, "Cold start");
    assert_eq!(warm.run_label, "Warm #1");
    for sample in [&cold, &warm] {
        assert!(sample.timings.ttfb.map_or(true, |t| t >= 0.0));
        assert!(sample.cls.map_or(true, |c| c >= 0.0));
        assert!(sample.total_blocking_time.map_or(true, |t| t >= 0.0));
        assert!(sample.slowest_resources.is_empty());
    }
}

#[tokio::test]
async fn test_login_page_is_rejected() {
    skip_without_chrome!();
    let Some((browser, _handle)) = browser::require_browser().await else {
        return;
    };

    let page = browser.new_page("about:blank").await.expect("Should create page");
    let mut session = ChromiumSession::new(page);
    session.reset(true).await.expect("Should reset");

    match session.sample(LOGIN_PAGE, 0).await {
        Err(SampleError::NotAuthenticated { dom, .. }) => assert!(dom.contains("Sign in")),
        other => panic!("expected NotAuthenticated, got {:?}", other),
    }
}
