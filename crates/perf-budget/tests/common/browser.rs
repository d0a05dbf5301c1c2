//! Headless Chromium for browser-backed tests

#![allow(dead_code)]

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Set `PERF_BUDGET_SKIP_BROWSER` to skip everything that needs Chrome.
pub fn skipped() -> bool {
    std::env::var("PERF_BUDGET_SKIP_BROWSER").is_ok()
}

#[macro_export]
macro_rules! skip_without_chrome {
    () => {
        if browser::skipped() {
            eprintln!("Skipping test: PERF_BUDGET_SKIP_BROWSER is set");
            return;
        }
    };
}

async fn launch() -> anyhow::Result<(Browser, tokio::task::JoinHandle<()>)> {
    static PROFILE: AtomicU64 = AtomicU64::new(0);

    // Separate profiles so parallel test binaries never share a lock file
    let user_data_dir = std::env::temp_dir().join(format!(
        "perf-budget-{}-{}",
        std::process::id(),
        PROFILE.fetch_add(1, Ordering::SeqCst)
    ));
    let config = BrowserConfig::builder()
        .user_data_dir(user_data_dir)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid browser config: {}", e))?;

    let (browser, mut handler) = Browser::launch(config).await?;
    let handle = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });
    Ok((browser, handle))
}

/// A launched browser, or `None` (with a note) when Chrome is not installed.
pub async fn require_browser() -> Option<(Browser, tokio::task::JoinHandle<()>)> {
    match launch().await {
        Ok(browser) => Some(browser),
        Err(e) => {
            eprintln!("Skipping test: could not launch Chrome: {}", e);
            None
        }
    }
}
