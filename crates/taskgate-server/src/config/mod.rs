//! Startup configuration.
//!
//! Layers, lowest first: built-in defaults, the optional YAML file named by
//! `TASKGATE_CONFIG` (strict parsing), then `MAX_CONCURRENT_REQUESTS`.
//! A bad capacity value never fails startup; it falls back to
//! [`DEFAULT_MAX_CONCURRENT`] with a warning.

pub mod schema;

use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use taskgate_core::error::{Result, TaskGateError};

pub use schema::{AdmissionSection, FileConfig, ServerSection};

pub const DEFAULT_MAX_CONCURRENT: usize = 10;
pub const CAPACITY_ENV: &str = "MAX_CONCURRENT_REQUESTS";
pub const CONFIG_PATH_ENV: &str = "TASKGATE_CONFIG";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub shutdown_timeout: Duration,
    pub max_concurrent: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            shutdown_timeout: Duration::from_millis(schema::default_shutdown_timeout_ms()),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl ServerConfig {
    pub fn with_capacity(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
            ..Self::default()
        }
    }
}

/// Read the process environment and the optional config file.
pub fn load_from_env() -> Result<ServerConfig> {
    let file = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            tracing::info!(%path, "loading config file");
            Some(load_from_file(&path)?)
        }
        Err(_) => None,
    };
    let env_capacity = std::env::var(CAPACITY_ENV).ok();
    resolve(file.as_ref(), env_capacity.as_deref())
}

pub fn load_from_file(path: &str) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TaskGateError::InvalidConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FileConfig> {
    let cfg: FileConfig = serde_yaml::from_str(s)
        .map_err(|e| TaskGateError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Merge a parsed file (if any) with the raw `MAX_CONCURRENT_REQUESTS` value.
pub fn resolve(file: Option<&FileConfig>, env_capacity: Option<&str>) -> Result<ServerConfig> {
    let mut cfg = ServerConfig::default();
    if let Some(file) = file {
        cfg.listen = file.server.listen_addr()?;
        cfg.shutdown_timeout = Duration::from_millis(file.server.shutdown_timeout_ms);
    }
    let file_capacity = file.and_then(|f| f.admission.max_concurrent_requests);
    cfg.max_concurrent = effective_capacity(env_capacity, file_capacity);
    Ok(cfg)
}

/// Pick the gate capacity. The environment wins over the file; anything
/// missing, unparsable or non-positive becomes [`DEFAULT_MAX_CONCURRENT`].
pub fn effective_capacity(env_value: Option<&str>, file_value: Option<i64>) -> usize {
    if let Some(raw) = env_value {
        return match raw.trim().parse::<i64>() {
            Ok(n) if n > 0 => clamp_capacity(n),
            _ => {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_MAX_CONCURRENT,
                    "invalid MAX_CONCURRENT_REQUESTS, using default"
                );
                DEFAULT_MAX_CONCURRENT
            }
        };
    }
    match file_value {
        Some(n) if n > 0 => clamp_capacity(n),
        Some(n) => {
            tracing::warn!(
                value = n,
                default = DEFAULT_MAX_CONCURRENT,
                "admission.max_concurrent_requests must be positive, using default"
            );
            DEFAULT_MAX_CONCURRENT
        }
        None => {
            tracing::warn!(
                default = DEFAULT_MAX_CONCURRENT,
                "MAX_CONCURRENT_REQUESTS not set, using default"
            );
            DEFAULT_MAX_CONCURRENT
        }
    }
}

// tokio semaphores cap out at usize::MAX >> 3 permits.
fn clamp_capacity(n: i64) -> usize {
    usize::try_from(n)
        .unwrap_or(usize::MAX)
        .min(tokio::sync::Semaphore::MAX_PERMITS)
}
