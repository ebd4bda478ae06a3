//! # Router Configuration
//!
//! Registration-time and generation-time policy for a [`Router`](crate::Router).
//!
//! ## Fields
//!
//! - `prefix` / `suffix` - wrapped around every path registered through the
//!   verb helpers (`get`, `post`, `put`, `delete`, `any`), `root()` and resources.
//!   Plain `add()` takes its path literally.
//! - `default_pattern` - regex used for `{name}` placeholders without an inline
//!   pattern. Default: `[^/]+`
//! - `chunk_size` - number of dynamic routes folded into one combined regex.
//!   Default: `10`
//! - `short_urls` - when `false`, generated paths are encoded as
//!   `?path=<path>&extra=...`. Default: `true`
//!
//! ## Environment Variables
//!
//! [`RouterConfig::from_env`] layers these over the defaults, and
//! [`RouterConfig::with_env_overrides`] over an existing config. The
//! `waypoint` binary applies them on top of the route table's `config`.
//!
//!
//! - `WAYPOINT_PREFIX`
//! - `WAYPOINT_SUFFIX`
//! - `WAYPOINT_DEFAULT_PATTERN`
//! - `WAYPOINT_CHUNK_SIZE` (decimal `10` or hexadecimal `0xa`; unparsable values are ignored)
//! - `WAYPOINT_SHORT_URLS` (`true`, `false`, `1`, `0`)
//!
//! ```rust
//! use waypoint::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! assert!(config.chunk_size >= 1);
//! ```

use serde::Deserialize;
use std::env;

pub const DEFAULT_PATTERN: &str = "[^/]+";
pub const DEFAULT_CHUNK_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub prefix: String,
    pub suffix: String,
    pub default_pattern: String,
    pub chunk_size: usize,
    pub short_urls: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            default_pattern: DEFAULT_PATTERN.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            short_urls: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply any `WAYPOINT_*` variables that are set on top of `self`.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, keyed by `WAYPOINT_*` name.
    ///
    /// An unparsable chunk size leaves the current value in place.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prefix) = lookup("WAYPOINT_PREFIX") {
            self.prefix = prefix;
        }
        if let Some(suffix) = lookup("WAYPOINT_SUFFIX") {
            self.suffix = suffix;
        }
        if let Some(pattern) = lookup("WAYPOINT_DEFAULT_PATTERN") {
            if !pattern.is_empty() {
                self.default_pattern = pattern;
            }
        }
        if let Some(val) = lookup("WAYPOINT_CHUNK_SIZE") {
            let val = val.trim();
            let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
                Some(hex) => usize::from_str_radix(hex, 16).ok(),
                None => val.parse().ok(),
            };
            if let Some(chunk_size) = parsed {
                self.chunk_size = chunk_size;
            }
        }
        if let Some(val) = lookup("WAYPOINT_SHORT_URLS") {
            self.short_urls = !matches!(val.to_lowercase().as_str(), "false" | "0" | "no");
        }
        self
    }

    /// Chunk size with zero clamped to one.
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_default_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.default_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_short_urls(mut self, short_urls: bool) -> Self {
        self.short_urls = short_urls;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.default_pattern, "[^/]+");
        assert_eq!(config.chunk_size, 10);
        assert!(config.short_urls);
        assert!(config.prefix.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: RouterConfig = serde_yaml::from_str("prefix: /api\nchunk_size: 3\n").unwrap();
        assert_eq!(config.prefix, "/api");
        assert_eq!(config.chunk_size, 3);
        assert_eq!(config.default_pattern, DEFAULT_PATTERN);
    }

    fn overrides(vars: &[(&str, &str)]) -> RouterConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RouterConfig::default().with_overrides_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_chunk_size_overrides() {
        assert_eq!(overrides(&[("WAYPOINT_CHUNK_SIZE", "0xa")]).chunk_size, 10);
        assert_eq!(overrides(&[("WAYPOINT_CHUNK_SIZE", "0x20")]).chunk_size, 32);
        assert_eq!(overrides(&[("WAYPOINT_CHUNK_SIZE", "25")]).chunk_size, 25);

        // garbage keeps whatever was configured before
        let config = RouterConfig::default()
            .with_chunk_size(4)
            .with_overrides_from(|key| (key == "WAYPOINT_CHUNK_SIZE").then(|| "lots".to_string()));
        assert_eq!(config.chunk_size, 4);
        assert_eq!(overrides(&[("WAYPOINT_CHUNK_SIZE", "0xzz")]).chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_short_urls_override() {
        assert!(!overrides(&[("WAYPOINT_SHORT_URLS", "false")]).short_urls);
        assert!(!overrides(&[("WAYPOINT_SHORT_URLS", "0")]).short_urls);
        assert!(!overrides(&[("WAYPOINT_SHORT_URLS", "No")]).short_urls);
        assert!(overrides(&[("WAYPOINT_SHORT_URLS", "true")]).short_urls);
        assert!(overrides(&[]).short_urls);
    }

    #[test]
    fn test_string_overrides() {
        let config = overrides(&[
            ("WAYPOINT_PREFIX", "/api/"),
            ("WAYPOINT_SUFFIX", ".json"),
            ("WAYPOINT_DEFAULT_PATTERN", ""),
        ]);
        assert_eq!(config.prefix, "/api/");
        assert_eq!(config.suffix, ".json");
        // empty pattern is ignored
        assert_eq!(config.default_pattern, DEFAULT_PATTERN);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let config = RouterConfig::default().with_chunk_size(0);
        assert_eq!(config.effective_chunk_size(), 1);
    }
}
