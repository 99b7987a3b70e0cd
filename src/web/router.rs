//! Request-line parsing and dispatch to the three host info handlers.

use crate::error::Result;
use crate::metrics::{sampler::measure_load, HostInfoProvider};
use crate::web::response::Response;
use std::time::Duration;
use tracing::{error, warn};

/// The three parts of an HTTP request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub version: &'a str,
}

impl<'a> RequestLine<'a> {
    /// Parse the first line of a raw request.
    ///
    /// The line ends at the first `\n`, with an optional `\r` before it.
    /// Returns `None` unless the line has exactly three space separated parts
    /// and the last one looks like an HTTP version.
    pub fn parse(raw: &'a [u8]) -> Option<Self> {
        let line = raw.split(|&b| b == b'\n').next().unwrap_or_default();
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let line = std::str::from_utf8(line).ok()?;

        let mut parts = line.split(' ');
        let method = parts.next().filter(|m| !m.is_empty())?;
        let target = parts.next().filter(|t| !t.is_empty())?;
        let version = parts.next().filter(|v| v.starts_with("HTTP/"))?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            method,
            target,
            version,
        })
    }
}

/// Known request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Hostname,
    CpuName,
    Load,
}

impl Route {
    /// Match a parsed request line. Only `GET` on an exact path matches.
    pub fn from_request(request: &RequestLine<'_>) -> Option<Self> {
        if request.method != "GET" {
            return None;
        }

        match request.target {
            "/hostname" => Some(Route::Hostname),
            "/cpu-name" => Some(Route::CpuName),
            "/load" => Some(Route::Load),
            _ => None,
        }
    }

    /// Parse and match a raw request buffer in one go.
    pub fn resolve(raw: &[u8]) -> Option<Self> {
        RequestLine::parse(raw).and_then(|request| Self::from_request(&request))
    }

    /// Path this route is served on.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Hostname => "/hostname",
            Route::CpuName => "/cpu-name",
            Route::Load => "/load",
        }
    }
}

/// Dispatches raw requests to the handlers backed by a [`HostInfoProvider`].
#[derive(Debug, Clone)]
pub struct Router<P> {
    provider: P,
    load_interval: Duration,
}

impl<P: HostInfoProvider> Router<P> {
    pub fn new(provider: P, load_interval: Duration) -> Self {
        Self {
            provider,
            load_interval,
        }
    }

    /// Build the response for a raw request.
    ///
    /// Unknown or malformed requests get 400. Handler failures are logged
    /// and become a bare 500.
    pub async fn respond(&self, raw: &[u8]) -> Response {
        let Some(route) = Route::resolve(raw) else {
            warn!(
                request_line = %first_line_lossy(raw),
                "No route matched, answering 400"
            );
            return Response::bad_request();
        };

        match self.handle(route).await {
            Ok(body) => Response::ok(body),
            Err(e) => {
                error!(route = route.path(), "{}", e);
                Response::internal_error()
            }
        }
    }

    /// Run the handler for `route` and return the response body.
    pub async fn handle(&self, route: Route) -> Result<String> {
        match route {
            Route::Hostname => self.provider.hostname(),
            Route::CpuName => self.provider.cpu_name(),
            Route::Load => {
                let load = measure_load(&self.provider, self.load_interval).await?;
                Ok(load.to_string())
            }
        }
    }
}

fn first_line_lossy(raw: &[u8]) -> String {
    let line = raw.split(|&b| b == b'\n').next().unwrap_or_default();
    String::from_utf8_lossy(line).trim_end().to_string()
}
