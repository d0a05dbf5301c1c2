//! Saved browser storage state
//!
//! Pages behind a login are measured with cookies captured by a separate
//! sign-in step and saved in the common `storageState` JSON layout:
//!
//! ```json
//! { "cookies": [ { "name": "sid", "value": "...", "domain": ".example.com", "path": "/",
//!                  "expires": -1, "httpOnly": true, "secure": true, "sameSite": "Lax" } ],
//!   "origins": [] }
//! ```

use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageState {
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

impl StorageState {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// The stored cookies as CDP parameters.
    ///
    /// Cookies are installed as session cookies; expiry is not carried over.
    pub fn cookie_params(&self) -> Vec<CookieParam> {
        self.cookies
            .iter()
            .filter_map(|c| {
                let mut builder = CookieParam::builder()
                    .name(c.name.clone())
                    .value(c.value.clone())
                    .http_only(c.http_only)
                    .secure(c.secure);
                if let Some(domain) = &c.domain {
                    builder = builder.domain(domain.clone());
                }
                if let Some(path) = &c.path {
                    builder = builder.path(path.clone());
                }
                match builder.build() {
                    Ok(param) => Some(param),
                    Err(e) => {
                        tracing::warn!(cookie = %c.name, "Skipping stored cookie: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}
