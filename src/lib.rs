//! # hostinfo - Minimal Host Diagnostics over HTTP
//!
//! A tiny, single-threaded HTTP server answering three plain-text queries
//! about the machine it runs on:
//!
//! - `GET /hostname` - the configured hostname
//! - `GET /cpu-name` - the CPU model string from `/proc/cpuinfo`
//! - `GET /load` - CPU utilization over a 500 ms window, e.g. `37%`
//!
//! Connections are accepted and answered one at a time. Every response closes
//! the connection.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hostinfo::{ProcFs, Server, ServerConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default().with_port(12345);
//!     let server = Server::bind(&config, ProcFs::new(&config.proc_root)).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use error::{HostInfoError, Result};
pub use metrics::{
    data::{CpuLoad, CpuSample},
    procfs::ProcFs,
    sampler::measure_load,
    HostInfoProvider,
};
pub use web::{
    response::{Response, Status},
    router::{RequestLine, Route},
    Server, ServerConfig,
};

/// The default CPU load sampling window in milliseconds
pub const DEFAULT_LOAD_INTERVAL_MS: u64 = 500;

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 8080;

/// Size of a single socket read when buffering a request
pub const READ_CHUNK_SIZE: usize = 4096;

/// Listen backlog of the server socket
pub const DEFAULT_BACKLOG: u32 = 3;
