//! TCP server for handling echo connections.
//!
//! Accepts connections and serves each one in its own task running the
//! per-connection echo loop.

use crate::config::Config;
use crate::error::ConnectionError;
use crate::listener;
use crate::scan::{self, ScanResult};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, trace};

/// Server instance
pub struct Server {
    config: Config,
    connection_limit: Arc<Semaphore>,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        let connection_limit = Arc::new(Semaphore::new(config.max_connections));

        Server {
            config,
            connection_limit,
        }
    }

    /// Bind the configured address and begin accepting connections
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.listen.parse()?;
        let listener = listener::bind(addr, self.config.backlog)?;
        info!(address = %listener.local_addr()?, "Server listening");

        self.serve(listener).await
    }

    /// Accept connections from an already-bound listener.
    ///
    /// Split out from `run` so tests can serve on an ephemeral port.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let buffer_size = self.config.buffer_size;

        loop {
            // Wait for a connection slot
            let permit = self.connection_limit.clone().acquire_owned().await?;

            match listener.accept().await {
                Ok((stream, addr)) => {
                    debug!(peer = %addr, "New connection");

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, buffer_size).await {
                            debug!(peer = %addr, error = %e, "Connection error");
                        }
                        drop(permit);
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

/// Serve one connection: read a chunk, echo the first line, repeat.
///
/// Each iteration performs exactly one read and scans only the bytes that
/// read returned. Bytes after the first newline in a read are discarded.
/// A read without a newline terminates the connection with
/// `ConnectionError::MissingTerminator` instead of echoing anything.
async fn handle_connection(
    mut stream: TcpStream,
    buffer_size: usize,
) -> Result<(), ConnectionError> {
    let mut buffer = BytesMut::with_capacity(buffer_size);
    buffer.resize(buffer_size, 0);
    let mut lines = 0u64;

    loop {
        let n = stream.read(&mut buffer[..]).await?;
        if n == 0 {
            // Peer closed its sending side
            debug!(lines, "Connection closed by peer");
            return Ok(());
        }

        match scan::scan(&buffer[..n]) {
            ScanResult::Line { len } => {
                stream.write_all(&buffer[..len]).await?;
                lines += 1;
                trace!(len, "Echoed line");
            }
            ScanResult::MissingTerminator => {
                return Err(ConnectionError::MissingTerminator { len: n });
            }
        }
    }
}
