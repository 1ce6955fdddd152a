//! Connection handling.
//!
//! # Responsibilities
//! - Accept connections from the bounded listener
//! - Run the blocking request parser for each connection off the runtime
//! - Answer with a single status-only reply and close
//! - Stop accepting on shutdown and drain in-flight connections
//!
//! # Design Decisions
//! - One request per connection (no keep-alive)
//! - The read timeout lives on the socket; the parser knows nothing of time
//! - The parser is built once from config and shared by every connection

use std::io::{BufReader, Read};
use std::net::{Shutdown as SocketShutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::ServerConfig;
use crate::http::parser::RequestParser;
use crate::http::response::write_status;
use crate::http::StatusCode;
use crate::net::{ConnectionGuard, ConnectionPermit, ConnectionTracker, Listener, ListenerError};

/// How long `run` waits for in-flight connections after shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bounds on discarding leftover input before close.
const LINGER_TIMEOUT: Duration = Duration::from_millis(200);
const LINGER_LIMIT: u64 = 64 * 1024;

/// HTTP front-end server.
#[derive(Debug)]
pub struct HttpServer {
    config: Arc<ServerConfig>,
    parser: Arc<RequestParser>,
    tracker: ConnectionTracker,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let parser = Arc::new(RequestParser::new(&config.parser));
        Self {
            config,
            parser,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let read_timeout = Duration::from_secs(self.config.timeouts.read_secs);
        tracing::info!(
            address = ?listener.local_addr().ok(),
            webroot = %self.config.webroot.0,
            "HTTP server starting"
        );

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = match accepted {
                        Ok(accepted) => accepted,
                        Err(ListenerError::Accept(e)) => {
                            tracing::warn!(error = %e, "Accept failed");
                            continue;
                        }
                        Err(e) => return Err(e),
                    };
                    let stream = match stream.into_std() {
                        Ok(stream) => stream,
                        Err(e) => {
                            tracing::warn!(peer_addr = %peer_addr, error = %e, "Failed to detach stream");
                            continue;
                        }
                    };

                    let connection = Connection {
                        stream,
                        peer_addr,
                        read_timeout,
                        guard: self.tracker.track(),
                        _permit: permit,
                    };
                    let parser = Arc::clone(&self.parser);
                    tokio::task::spawn_blocking(move || connection.serve(&parser));
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, no longer accepting");
                    break;
                }
            }
        }

        if !self.tracker.drain(DRAIN_TIMEOUT).await {
            tracing::warn!(
                active = self.tracker.active_count(),
                "Connections still open after drain timeout"
            );
        }
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handle to the live-connection counter.
    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }
}

/// One accepted connection, served on the blocking pool.
struct Connection {
    stream: TcpStream,
    peer_addr: SocketAddr,
    read_timeout: Duration,
    guard: ConnectionGuard,
    _permit: ConnectionPermit,
}

impl Connection {
    fn serve(self, parser: &RequestParser) {
        let connection_id = self.guard.id();
        match self.exchange(parser) {
            Ok(status) => tracing::debug!(
                connection_id = %connection_id,
                peer_addr = %self.peer_addr,
                status = status.as_u16(),
                "Reply sent"
            ),
            Err(e) => tracing::warn!(
                connection_id = %connection_id,
                peer_addr = %self.peer_addr,
                error = %e,
                "Connection error"
            ),
        }
    }

    fn exchange(&self, parser: &RequestParser) -> std::io::Result<StatusCode> {
        self.stream.set_nonblocking(false)?;
        self.stream.set_read_timeout(Some(self.read_timeout))?;

        let mut reader = BufReader::new(&self.stream);
        let status = match parser.parse(&mut reader) {
            Ok(request) => {
                tracing::info!(
                    connection_id = %self.guard.id(),
                    peer_addr = %self.peer_addr,
                    method = %request.method(),
                    target = %request.target(),
                    version = %request.original_version(),
                    "Request"
                );
                StatusCode::Ok
            }
            Err(e) => {
                tracing::info!(
                    connection_id = %self.guard.id(),
                    peer_addr = %self.peer_addr,
                    status = e.status().as_u16(),
                    error = %e,
                    "Bad request"
                );
                e.status()
            }
        };

        let mut writer = &self.stream;
        write_status(&mut writer, status)?;
        self.linger(reader);
        Ok(status)
    }

    /// Half-close, then discard whatever the peer still sends so that
    /// closing with unread input does not reset the reply away.
    fn linger(&self, reader: BufReader<&TcpStream>) {
        if self.stream.shutdown(SocketShutdown::Write).is_err() {
            return;
        }
        if self.stream.set_read_timeout(Some(LINGER_TIMEOUT)).is_ok() {
            let _ = std::io::copy(&mut reader.take(LINGER_LIMIT), &mut std::io::sink());
        }
    }
}
