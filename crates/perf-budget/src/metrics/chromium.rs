//! Page sampling through chromiumoxide
//!
//! # How it works
//!
//! 1. [`OBSERVER_SCRIPT`] is registered with `addScriptToEvaluateOnNewDocument`
//!    so it runs before any page script on every navigation.
//! 2. It attaches `PerformanceObserver`s for largest-contentful-paint,
//!    layout-shift and longtask entries and accumulates them on `window`.
//! 3. After the page settles, [`READ_METRICS_SCRIPT`] reads navigation, paint
//!    and resource timing plus the accumulated values, then clears the
//!    resource timing buffer so the next load in the same page starts empty.
//! 4. The JSON payload is decoded into [`RawPageMetrics`] and turned into a
//!    [`Sample`].

use chromiumoxide::cdp::browser_protocol::network::{ClearBrowserCacheParams, CookieParam};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::login::{looks_like_login, BODY_SNIFF_CHARS};
use super::raw::RawPageMetrics;
use super::sample::Sample;
use super::session::PageSession;
use crate::error::SampleError;
use crate::throttling::{CpuThrottler, NetworkConditions, NetworkThrottler, CONSTRAINED_CPU_RATE};

/// Pause after the page settles so late layout shifts and long tasks land.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Observers installed before any page script runs.
///
/// `clsSupported` / `longTaskSupported` stay false when the browser rejects
/// the observer type, which is reported as "unavailable" rather than zero.
pub const OBSERVER_SCRIPT: &str = r#"
(function() {
    'use strict';
    if (window.__perfBudgetObservers) return;
    window.__perfBudgetObservers = true;
    const store = window.__perfBudget = {
        lcp: null,
        cls: 0,
        clsSupported: false,
        longTasks: [],
        longTaskSupported: false
    };

    try {
        new PerformanceObserver((list) => {
            const last = list.getEntries().at(-1);
            if (last) store.lcp = last.renderTime || last.loadTime || last.startTime || null;
        }).observe({ type: 'largest-contentful-paint', buffered: true });
    } catch (e) {}

    try {
        new PerformanceObserver((list) => {
            for (const entry of list.getEntries()) {
                if (!entry.hadRecentInput && typeof entry.value === 'number') store.cls += entry.value;
            }
        }).observe({ type: 'layout-shift', buffered: true });
        store.clsSupported = true;
    } catch (e) {}

    try {
        new PerformanceObserver((list) => {
            for (const entry of list.getEntries()) store.longTasks.push(entry.duration);
        }).observe({ type: 'longtask', buffered: true });
        store.longTaskSupported = true;
    } catch (e) {}
})();
"#;

/// Reads one load's metrics and clears the resource timing buffer.
pub const READ_METRICS_SCRIPT: &str = r#"
(() => {
    const [nav] = performance.getEntriesByType('navigation');
    const fp = performance.getEntriesByName('first-paint')[0];
    const fcp = performance.getEntriesByName('first-contentful-paint')[0];
    const lcpEntries = performance.getEntriesByType('largest-contentful-paint');
    const resources = performance.getEntriesByType('resource');
    const store = window.__perfBudget;

    performance.clearResourceTimings();

    return {
        navigation: nav ? {
            domContentLoadedEventEnd: nav.domContentLoadedEventEnd,
            loadEventEnd: nav.loadEventEnd,
            responseStart: nav.responseStart,
            requestStart: nav.requestStart,
            transferSize: nav.transferSize,
            encodedBodySize: nav.encodedBodySize,
            decodedBodySize: nav.decodedBodySize,
            serverTiming: (nav.serverTiming || []).map((e) => ({
                name: e.name, description: e.description, duration: e.duration
            }))
        } : null,
        paints: {
            firstPaint: fp ? fp.startTime : null,
            firstContentfulPaint: fcp ? fcp.startTime : null
        },
        largestContentfulPaint: lcpEntries.length
            ? lcpEntries[lcpEntries.length - 1].startTime
            : (store ? store.lcp : null),
        cls: store && store.clsSupported ? store.cls : null,
        longTasks: store && store.longTaskSupported ? store.longTasks : null,
        resourceEntries: resources.map((e) => ({
            name: e.name,
            initiatorType: e.initiatorType || 'other',
            transferSize: e.transferSize || 0,
            encodedBodySize: e.encodedBodySize || 0,
            decodedBodySize: e.decodedBodySize || 0,
            duration: e.duration || 0
        }))
    };
})()
"#;

/// A chromiumoxide page used as a measurable session.
pub struct ChromiumSession {
    page: Page,
    observers_injected: bool,
}

impl ChromiumSession {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            observers_injected: false,
        }
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    /// Install cookies, e.g. from a saved storage state.
    #[instrument(skip(self, cookies), fields(count = cookies.len()))]
    pub async fn install_cookies(&self, cookies: Vec<CookieParam>) -> Result<(), SampleError> {
        if cookies.is_empty() {
            return Ok(());
        }
        self.page.set_cookies(cookies).await?;
        debug!("Session cookies installed");
        Ok(())
    }

    async fn inject_observers(&mut self) -> Result<(), SampleError> {
        if self.observers_injected {
            return Ok(());
        }
        debug!("Injecting performance observers");
        self.page
            .execute(AddScriptToEvaluateOnNewDocumentParams::new(OBSERVER_SCRIPT))
            .await?;
        self.observers_injected = true;
        Ok(())
    }

    async fn ensure_authenticated(&self) -> Result<(), SampleError> {
        let url = self.page.url().await?.unwrap_or_default();
        let body: String = self
            .page
            .evaluate(format!(
                "(document.body && document.body.innerText || '').slice(0, {})",
                BODY_SNIFF_CHARS
            ))
            .await?
            .into_value()?;

        if looks_like_login(&url, &body) {
            let dom = self.page.content().await.unwrap_or_default();
            return Err(SampleError::NotAuthenticated { url, dom });
        }
        Ok(())
    }
}

impl PageSession for ChromiumSession {
    #[instrument(skip(self))]
    async fn reset(&mut self, clear_cache: bool) -> Result<(), SampleError> {
        self.page.goto("about:blank").await?;

        if clear_cache {
            if let Err(e) = self.page.execute(ClearBrowserCacheParams::default()).await {
                warn!("Unable to clear browser cache for cold run: {}", e);
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn apply_constrained_profile(&mut self) -> Result<(), SampleError> {
        CpuThrottler::apply(&self.page, CONSTRAINED_CPU_RATE)
            .await
            .map_err(|e| SampleError::Browser(e.to_string()))?;
        NetworkThrottler::apply(&self.page, NetworkConditions::CONSTRAINED)
            .await
            .map_err(|e| SampleError::Browser(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn sample(&mut self, url: &str, attempt: u32) -> Result<Sample, SampleError> {
        self.inject_observers().await?;

        debug!("Navigating to: {}", url);
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;

        self.ensure_authenticated().await?;
        tokio::time::sleep(SETTLE_DELAY).await;

        let raw: RawPageMetrics = self.page.evaluate(READ_METRICS_SCRIPT).await?.into_value()?;
        let sample = raw.into_sample(attempt);

        debug!(
            run = %sample.run_label,
            ttfb = ?sample.timings.ttfb,
            lcp = ?sample.timings.largest_contentful_paint,
            requests = sample.request_count,
            "Sample collected"
        );
        Ok(sample)
    }

    async fn cookie_header(&self) -> Option<String> {
        match self.page.get_cookies().await {
            Ok(cookies) if !cookies.is_empty() => Some(
                cookies
                    .iter()
                    .map(|c| format!("{}={}", c.name, c.value))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Ok(_) => None,
            Err(e) => {
                warn!("Unable to read session cookies: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_script_guards_and_observes() {
        assert!(OBSERVER_SCRIPT.contains("__perfBudgetObservers"));
        assert!(OBSERVER_SCRIPT.contains("largest-contentful-paint"));
        assert!(OBSERVER_SCRIPT.contains("layout-shift"));
        assert!(OBSERVER_SCRIPT.contains("hadRecentInput"));
        assert!(OBSERVER_SCRIPT.contains("longtask"));
    }

    #[test]
    fn test_read_script_clears_resource_buffer() {
        assert!(READ_METRICS_SCRIPT.contains("performance.clearResourceTimings()"));
        assert!(READ_METRICS_SCRIPT.contains("clsSupported"));
        assert!(READ_METRICS_SCRIPT.contains("longTaskSupported"));
    }
}
