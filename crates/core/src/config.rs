//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the repository
//! client. Library code never reads environment variables itself; binaries do that
//! and hand the values to [`resolve_base_url`].

use crate::constants::DEFAULT_BASE_URL;
use crate::{CoreError, CoreResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    base_url: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The base URL must use `http` or `https`. Trailing slashes are removed so paths
    /// can be joined with a single `/`.
    pub fn new(base_url: impl AsRef<str>) -> CoreResult<Self> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| {
                CoreError::InvalidInput(format!(
                    "base URL must start with http:// or https://, got '{trimmed}'"
                ))
            })?;

        if rest.is_empty() {
            return Err(CoreError::InvalidInput("base URL has no host".into()));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Repository base address without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Resolve the repository base URL from an optional configured value.
///
/// If `value` is `None` or empty/whitespace, the [`DEFAULT_BASE_URL`] is used.
pub fn resolve_base_url(value: Option<String>) -> CoreResult<CoreConfig> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    CoreConfig::new(value.as_deref().unwrap_or(DEFAULT_BASE_URL))
}
