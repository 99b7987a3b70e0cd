//! Server configuration.

use crate::error::{HostInfoError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the diagnostic server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
    /// Listen backlog
    pub backlog: u32,
    /// Bytes requested per socket read while buffering a request
    pub read_chunk_size: usize,
    /// CPU load sampling window in milliseconds
    pub load_interval_ms: u64,
    /// Mount point of procfs
    pub proc_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_WEB_PORT,
            backlog: crate::DEFAULT_BACKLOG,
            read_chunk_size: crate::READ_CHUNK_SIZE,
            load_interval_ms: crate::DEFAULT_LOAD_INTERVAL_MS,
            proc_root: PathBuf::from("/proc"),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the host for the server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the listen backlog.
    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    /// Set the read chunk size. Zero is bumped to one byte.
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    /// Set the CPU load sampling window.
    pub fn with_load_interval_ms(mut self, interval_ms: u64) -> Self {
        self.load_interval_ms = interval_ms;
        self
    }

    /// Set the procfs mount point.
    pub fn with_proc_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.proc_root = root.into();
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the bind address into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address()
            .parse()
            .map_err(|e| HostInfoError::config_error(format!("Invalid bind address: {}", e)))
    }

    /// CPU load sampling window.
    pub fn load_interval(&self) -> Duration {
        Duration::from_millis(self.load_interval_ms)
    }
}
