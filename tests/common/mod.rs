//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use http_front::config::ServerConfig;
use http_front::http::HttpServer;
use http_front::lifecycle::Shutdown;
use http_front::net::{ConnectionTracker, Listener, ListenerError};

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub tracker: ConnectionTracker,
    pub handle: JoinHandle<Result<(), ListenerError>>,
}

/// Start a server on `127.0.0.1:0` with the given configuration.
#[allow(dead_code)]
pub async fn start_server(config: ServerConfig) -> TestServer {
    let max_connections = config.listener.max_connections;
    let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = tcp.local_addr().unwrap();
    let listener = Listener::from_listener(tcp, max_connections);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(Arc::new(config));
    let tracker = server.tracker();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        tracker,
        handle,
    }
}

/// Send raw bytes, half-close, and read the whole reply.
#[allow(dead_code)]
pub async fn exchange(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut reply = String::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut reply))
        .await
        .expect("reply timed out")
        .unwrap();
    reply
}

/// Status code from the first line of a reply.
#[allow(dead_code)]
pub fn status_of(reply: &str) -> u16 {
    reply
        .split(' ')
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap_or_else(|| panic!("not a status line: {reply:?}"))
}

/// A fresh path under the system temp dir.
#[allow(dead_code)]
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("http-front-{}-{n}-{name}", std::process::id()))
}
