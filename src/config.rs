//! Configuration parsed from environment variables.

use std::path::PathBuf;

use crate::announcer::DEFAULT_ANNOUNCER_CAPACITY;

pub const DEFAULT_STORAGE_DIR: &str = ".tech4all";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection details for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without a trailing slash.
    pub url: String,
    pub anon_key: String,
    pub timeouts: Timeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` runs offline: static catalog, no identity, no remote writes.
    pub backend: Option<BackendConfig>,
    pub storage_dir: PathBuf,
    pub announcer_capacity: usize,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Remote mode (both required):
    /// - `TECH4ALL_BACKEND_URL`
    /// - `TECH4ALL_BACKEND_ANON_KEY`
    ///
    /// Optional:
    /// - `TECH4ALL_STORAGE_DIR`: default `.tech4all`
    /// - `TECH4ALL_REQUEST_TIMEOUT_SECS`: default 15
    /// - `TECH4ALL_CONNECT_TIMEOUT_SECS`: default 5
    /// - `TECH4ALL_ANNOUNCER_CAPACITY`: default 5
    #[must_use]
    pub fn from_env() -> Self {
        let url = non_empty_var("TECH4ALL_BACKEND_URL");
        let anon_key = non_empty_var("TECH4ALL_BACKEND_ANON_KEY");
        let backend = match (url, anon_key) {
            (Some(url), Some(anon_key)) => Some(BackendConfig {
                url: url.trim_end_matches('/').to_owned(),
                anon_key,
                timeouts: Timeouts {
                    request_secs: env_parse("TECH4ALL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                    connect_secs: env_parse("TECH4ALL_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
                },
            }),
            _ => None,
        };

        Self {
            backend,
            storage_dir: non_empty_var("TECH4ALL_STORAGE_DIR").map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from),
            announcer_capacity: env_parse("TECH4ALL_ANNOUNCER_CAPACITY", DEFAULT_ANNOUNCER_CAPACITY),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
