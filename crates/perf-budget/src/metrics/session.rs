//! The measurable page session capability
//!
//! Statistics, budget evaluation and reporting only ever see [`Sample`]s, so
//! anything that can load a URL and report a sample can drive the pipeline:
//! a real browser page ([`ChromiumSession`](super::chromium::ChromiumSession))
//! or a synthetic session in tests.

use std::future::Future;

use super::sample::Sample;
use crate::error::SampleError;

/// A live page that can be navigated and measured.
pub trait PageSession: Send {
    /// Leave the current page, optionally clearing the HTTP cache first.
    ///
    /// A failure to clear the cache is logged, not returned.
    fn reset(&mut self, clear_cache: bool) -> impl Future<Output = Result<(), SampleError>> + Send;

    /// Slow the session down to the constrained CPU/network profile.
    fn apply_constrained_profile(&mut self) -> impl Future<Output = Result<(), SampleError>> + Send;

    /// Load `url`, wait for it to settle, and measure it as attempt `attempt`.
    ///
    /// Metrics the browser cannot provide are reported as unavailable.
    fn sample(
        &mut self,
        url: &str,
        attempt: u32,
    ) -> impl Future<Output = Result<Sample, SampleError>> + Send;

    /// `Cookie` header value carrying the session's cookies, if any.
    fn cookie_header(&self) -> impl Future<Output = Option<String>> + Send;
}
