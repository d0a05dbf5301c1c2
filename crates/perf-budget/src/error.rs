//! Error types for configuration loading and page sampling
//!
//! Breach detection has no error type: an exceeded budget is a reported fact,
//! not a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading budgets, suite files or environment settings.
///
/// All of these are fatal and surface before any page is measured.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    Malformed(String),

    #[error("Budget document must have a \"default\" section")]
    MissingDefault,

    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: String, value: String },
}

/// Errors raised while taking a single page-load sample.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Browser command failed: {0}")]
    Browser(String),

    #[error("Failed to decode page metrics: {0}")]
    Decode(#[from] serde_json::Error),

    /// The page rendered a login or unauthorised shell instead of the target.
    ///
    /// Carries the final URL and DOM so callers can store them as diagnostics.
    #[error("Not authenticated: redirected to login page at {url}")]
    NotAuthenticated { url: String, dom: String },
}

impl From<chromiumoxide::error::CdpError> for SampleError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        SampleError::Browser(e.to_string())
    }
}
