//! CPU slowdown through `Emulation.setCPUThrottlingRate`

use anyhow::{ensure, Context, Result};
use chromiumoxide::cdp::browser_protocol::emulation::SetCpuThrottlingRateParams;
use chromiumoxide::Page;
use tracing::{debug, instrument};

/// Slowdown used by the constrained profile, roughly a mid-tier phone.
pub const CONSTRAINED_CPU_RATE: f64 = 4.0;

pub struct CpuThrottler;

impl CpuThrottler {
    /// Run the page's main thread `rate` times slower; 1.0 is full speed.
    ///
    /// ```no_run
    /// use perf_budget::throttling::{CpuThrottler, CONSTRAINED_CPU_RATE};
    /// # use chromiumoxide::Page;
    ///
    /// # async fn example(page: &Page) -> anyhow::Result<()> {
    /// CpuThrottler::apply(page, CONSTRAINED_CPU_RATE).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(page))]
    pub async fn apply(page: &Page, rate: f64) -> Result<()> {
        check_rate(rate)?;
        let params = SetCpuThrottlingRateParams::builder()
            .rate(rate)
            .build()
            .map_err(anyhow::Error::msg)?;
        page.execute(params)
            .await
            .with_context(|| format!("Failed to slow CPU down {}x", rate))?;
        debug!("CPU slowed down {}x", rate);
        Ok(())
    }
}

/// Rates below 1.0 would speed the page up, which the browser rejects.
fn check_rate(rate: f64) -> Result<()> {
    ensure!(rate >= 1.0, "CPU throttling rate must be at least 1.0, got {}", rate);
    Ok(())
}
