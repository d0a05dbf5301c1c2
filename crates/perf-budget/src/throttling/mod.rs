//! Network and CPU throttling via Chrome DevTools Protocol
//!
//! The constrained profile combines a 4× CPU slowdown with a slow mobile
//! network so pages can be checked against budgets on low-end devices.

pub mod cpu;
pub mod network;

pub use cpu::{CpuThrottler, CONSTRAINED_CPU_RATE};
pub use network::{NetworkConditions, NetworkThrottler};
