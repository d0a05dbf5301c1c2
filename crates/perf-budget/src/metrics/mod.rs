//! Page-load measurement
//!
//! - **Samples**: the [`Sample`] data model and its derived fields
//! - **Catalogue**: [`Metric`], which ties sample fields to thresholds and formatting
//! - **Sessions**: the [`PageSession`] capability and its chromiumoxide implementation
//!
//! # Example
//!
//! ```no_run
//! use perf_budget::metrics::{ChromiumSession, PageSession};
//! # use chromiumoxide::Page;
//!
//! # async fn example(page: Page) -> anyhow::Result<()> {
//! let mut session = ChromiumSession::new(page);
//! session.reset(true).await?;
//! let sample = session.sample("https://example.com", 0).await?;
//! println!("TTFB: {:?}ms", sample.timings.ttfb);
//! # Ok(())
//! # }
//! ```

pub mod chromium;
pub mod login;
pub mod metric;
pub mod raw;
pub mod sample;
pub mod session;
pub mod storage_state;

pub use chromium::ChromiumSession;
pub use metric::{Direction, Metric};
pub use sample::{
    MetricTimings, QualityScores, ResourceEntry, ResourceSummary, Sample, ServerTimingEntry,
    SlowResource,
};
pub use session::PageSession;
pub use storage_state::StorageState;
