//! The diagnostic HTTP server.
//!
//! [`Server`] owns the listening socket and answers one connection at a
//! time: read the request, route it, write the response, close. A failing
//! request never stops the accept loop.

pub mod config;
pub mod response;
pub mod router;

// Re-export commonly used items
pub use config::ServerConfig;
pub use router::Router;

use crate::error::{HostInfoError, Result};
use crate::metrics::HostInfoProvider;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, error, info};

/// Pause after a failed `accept` before trying again.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Serial HTTP server over a bound listening socket.
pub struct Server<P> {
    listener: TcpListener,
    router: Router<P>,
    read_chunk_size: usize,
}

impl<P: HostInfoProvider> Server<P> {
    /// Create, configure, bind and listen on the server socket.
    ///
    /// Any failure here is reported as [`HostInfoError::Bind`] (or `Config`
    /// for an unparsable address) and no socket is left open.
    pub async fn bind(config: &ServerConfig, provider: P) -> Result<Self> {
        let addr = config.socket_addr()?;
        let listener = listen(addr, config.backlog)?;
        let local = listener.local_addr()?;

        info!("Serving host info on http://{}", local);
        info!("  - Hostname: http://{}/hostname", local);
        info!("  - CPU name: http://{}/cpu-name", local);
        info!("  - CPU load: http://{}/load", local);

        Ok(Self {
            listener,
            router: Router::new(provider, config.load_interval()),
            read_chunk_size: config.read_chunk_size.max(1),
        })
    }

    /// Address the listening socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept and answer connections forever.
    ///
    /// A failed `accept` is logged and retried after [`ACCEPT_BACKOFF`].
    pub async fn run(self) {
        loop {
            if let Err(e) = self.serve_one().await {
                accept_backoff(&e).await;
            }
        }
    }

    /// Accept a single connection and handle it to completion.
    ///
    /// Only an `accept` failure is returned. Anything that goes wrong after
    /// that is logged and the connection is closed.
    pub async fn serve_one(&self) -> Result<()> {
        let (stream, peer) = self.listener.accept().await?;
        debug!(%peer, "Accepted connection");
        self.handle_connection(stream, peer).await;
        Ok(())
    }

    async fn handle_connection(&self, mut stream: TcpStream, peer: SocketAddr) {
        let request = match read_request(&mut stream, self.read_chunk_size).await {
            Ok(request) => request,
            Err(e) => {
                // Routed as an empty request, which answers 400
                error!(%peer, "Failed to read request: {}", e);
                Vec::new()
            }
        };

        let response = self.router.respond(&request).await;
        debug!(%peer, status = %response.status, "Responding");

        if let Err(e) = response.write_to(&mut stream).await {
            error!(%peer, "{} - Failed to send response: {}", response.status, e);
        }

        if let Err(e) = stream.shutdown().await {
            debug!(%peer, "Failed to shut down connection: {}", e);
        }
        // `stream` is dropped here, closing the connection on every path
    }
}

/// Log an `accept` failure and wait before the next attempt, so errors like
/// EMFILE don't spin the loop.
async fn accept_backoff(e: &HostInfoError) {
    error!("Failed to accept connection: {}", e);
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}

/// Build the listening socket with address and port reuse enabled.
fn listen(addr: SocketAddr, backlog: u32) -> Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(|e| HostInfoError::bind_error(format!("Failed to create server socket: {}", e)))?;

    socket
        .set_reuseaddr(true)
        .map_err(|e| HostInfoError::bind_error(format!("Failed to set socket options: {}", e)))?;

    #[cfg(all(unix, not(target_os = "solaris"), not(target_os = "illumos")))]
    socket
        .set_reuseport(true)
        .map_err(|e| HostInfoError::bind_error(format!("Failed to set socket options: {}", e)))?;

    socket.bind(addr).map_err(|e| {
        HostInfoError::bind_error(format!(
            "Failed to bind server socket to port {}: {}",
            addr.port(),
            e
        ))
    })?;

    socket.listen(backlog).map_err(|e| {
        HostInfoError::bind_error(format!("Failed to listen on port {}: {}", addr.port(), e))
    })
}

/// Read a request in `chunk_size` pieces until a read comes back short.
///
/// There is no `Content-Length` handling: a request that fills a chunk
/// exactly and then pauses is cut at that point.
pub async fn read_request<R>(reader: &mut R, chunk_size: usize) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut request = Vec::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];

    loop {
        let received = reader.read(&mut chunk).await?;
        request.extend_from_slice(&chunk[..received]);

        if received < chunk.len() {
            return Ok(request);
        }
    }
}
