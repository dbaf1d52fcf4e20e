//! Configuration Module
//!
//! Handles loading server, quota and maintenance settings from environment
//! variables.

use std::env;
use std::path::PathBuf;

use crate::storage::{
    PriorityConfig, DEFAULT_CLEANUP_KEYS, DEFAULT_CLEANUP_LIMIT, DEFAULT_ESSENTIAL_KEYS,
    DEFAULT_LOW_PRIORITY_KEYS, DEFAULT_OPTIMIZE_KEYS,
};

/// Default byte budget, the usual browser allowance per origin (5 MiB).
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Directory of the built frontend served as static files
    pub static_dir: PathBuf,
    /// Store byte budget, None = unlimited
    pub quota_bytes: Option<u64>,
    /// Items the cleanup pass keeps per list
    pub cleanup_limit: usize,
    /// Seconds between background cleanup runs, 0 = startup only
    pub maintenance_interval: u64,
    /// Keys evicted first, in order
    pub low_priority_keys: Vec<String>,
    /// Keys never evicted
    pub essential_keys: Vec<String>,
}

/// Keys and limits the maintenance passes work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceConfig {
    /// Keys re-encoded by the migration pass
    pub optimize_keys: Vec<String>,
    /// List-valued keys trimmed by the cleanup pass
    pub cleanup_keys: Vec<String>,
    /// Items kept per list
    pub cleanup_limit: usize,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            optimize_keys: to_strings(DEFAULT_OPTIMIZE_KEYS),
            cleanup_keys: to_strings(DEFAULT_CLEANUP_KEYS),
            cleanup_limit: DEFAULT_CLEANUP_LIMIT,
        }
    }
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATIC_DIR` - Frontend bundle directory (default: frontend/build)
    /// - `STORAGE_QUOTA_BYTES` - Store budget, 0 for unlimited (default: 5 MiB)
    /// - `CLEANUP_LIMIT` - Items kept per cleaned list (default: 20)
    /// - `MAINTENANCE_INTERVAL` - Background cleanup period in seconds (default: 0, off)
    /// - `LOW_PRIORITY_KEYS` - Comma-separated eviction order
    /// - `ESSENTIAL_KEYS` - Comma-separated protected keys
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            quota_bytes: match parse_var::<u64>("STORAGE_QUOTA_BYTES") {
                Some(0) => None,
                Some(bytes) => Some(bytes),
                None => defaults.quota_bytes,
            },
            cleanup_limit: parse_var("CLEANUP_LIMIT").unwrap_or(defaults.cleanup_limit),
            maintenance_interval: parse_var("MAINTENANCE_INTERVAL")
                .unwrap_or(defaults.maintenance_interval),
            low_priority_keys: list_var("LOW_PRIORITY_KEYS")
                .unwrap_or(defaults.low_priority_keys),
            essential_keys: list_var("ESSENTIAL_KEYS").unwrap_or(defaults.essential_keys),
        }
    }

    /// Eviction tiers for the accessor.
    pub fn priorities(&self) -> PriorityConfig {
        PriorityConfig::new(
            self.low_priority_keys.iter().cloned(),
            self.essential_keys.iter().cloned(),
        )
    }

    /// Settings for the migration and cleanup passes.
    pub fn maintenance(&self) -> MaintenanceConfig {
        MaintenanceConfig {
            cleanup_limit: self.cleanup_limit,
            ..MaintenanceConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            static_dir: PathBuf::from("frontend/build"),
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            cleanup_limit: DEFAULT_CLEANUP_LIMIT,
            maintenance_interval: 0,
            low_priority_keys: to_strings(DEFAULT_LOW_PRIORITY_KEYS),
            essential_keys: to_strings(DEFAULT_ESSENTIAL_KEYS),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Reads a comma-separated list, ignoring blanks. Unset or empty means None.
fn list_var(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let keys = parse_list(&raw);
    if keys.is_empty() {
        None
    } else {
        Some(keys)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

fn to_strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
