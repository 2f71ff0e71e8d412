use std::net::SocketAddr;

use serde::Deserialize;
use taskgate_core::error::{Result, TaskGateError};

/// Optional YAML config file named by `TASKGATE_CONFIG`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub admission: AdmissionSection,
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TaskGateError::UnsupportedVersion);
        }
        self.server.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(100..=300_000).contains(&self.shutdown_timeout_ms) {
            return Err(TaskGateError::InvalidConfig(
                "server.shutdown_timeout_ms must be between 100 and 300000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            TaskGateError::InvalidConfig(format!("server.listen must be a socket address: {e}"))
        })
    }
}

/// Capacity is kept signed so a non-positive value reaches the defaulting
/// logic instead of failing the parse.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdmissionSection {
    #[serde(default)]
    pub max_concurrent_requests: Option<i64>,
}

pub(crate) fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
pub(crate) fn default_shutdown_timeout_ms() -> u64 {
    10_000
}
