//! Slow network emulation through `Network.emulateNetworkConditions`

#![allow(deprecated)]

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::network::{
    ConnectionType, EmulateNetworkConditionsParams,
};
use chromiumoxide::Page;
use serde::Serialize;
use tracing::{debug, instrument};

/// Emulated network conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkConditions {
    pub offline: bool,
    /// Added round-trip latency in milliseconds
    pub latency_ms: f64,
    /// Download throughput in bytes per second (-1 means no throttling)
    pub download_throughput: f64,
    /// Upload throughput in bytes per second (-1 means no throttling)
    pub upload_throughput: f64,
}

impl NetworkConditions {
    /// Slow mobile connection used by the constrained profile.
    pub const CONSTRAINED: NetworkConditions = NetworkConditions {
        offline: false,
        latency_ms: 150.0,
        download_throughput: 1_600_000.0,
        upload_throughput: 750_000.0,
    };

    pub fn is_throttled(&self) -> bool {
        self.offline
            || self.latency_ms > 0.0
            || self.download_throughput >= 0.0
            || self.upload_throughput >= 0.0
    }
}

pub struct NetworkThrottler;

impl NetworkThrottler {
    /// Apply network conditions to a page
    ///
    /// # Example
    ///
    /// ```no_run
    /// use perf_budget::throttling::{NetworkConditions, NetworkThrottler};
    /// # use chromiumoxide::Page;
    ///
    /// # async fn example(page: &Page) -> anyhow::Result<()> {
    /// NetworkThrottler::apply(page, NetworkConditions::CONSTRAINED).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(page), fields(latency = conditions.latency_ms))]
    pub async fn apply(page: &Page, conditions: NetworkConditions) -> Result<()> {
        debug!(
            "Applying network throttling: offline={}, latency={}ms, down={:.2} KB/s, up={:.2} KB/s",
            conditions.offline,
            conditions.latency_ms,
            conditions.download_throughput / 1024.0,
            conditions.upload_throughput / 1024.0
        );

        let connection_type = if conditions.is_throttled() {
            ConnectionType::Cellular4g
        } else {
            ConnectionType::None
        };

        let params = EmulateNetworkConditionsParams::builder()
            .offline(conditions.offline)
            .latency(conditions.latency_ms)
            .download_throughput(conditions.download_throughput)
            .upload_throughput(conditions.upload_throughput)
            .connection_type(connection_type)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build network params: {}", e))?;

        page.execute(params).await?;

        debug!("Network throttling applied successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrained_conditions() {
        let c = NetworkConditions::CONSTRAINED;
        assert_eq!(c.latency_ms, 150.0);
        assert_eq!(c.download_throughput, 1_600_000.0);
        assert_eq!(c.upload_throughput, 750_000.0);
        assert!(!c.offline);
        assert!(c.is_throttled());
    }

    #[test]
    fn test_latency_alone_counts_as_throttled() {
        let open = NetworkConditions {
            offline: false,
            latency_ms: 0.0,
            download_throughput: -1.0,
            upload_throughput: -1.0,
        };
        assert!(!open.is_throttled());
        assert!(NetworkConditions { latency_ms: 20.0, ..open }.is_throttled());
    }
}
