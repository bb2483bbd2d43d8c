//! One-shot device sessions.
//!
//! The beamer speaks a fire-and-forget protocol: connect, write one payload,
//! close. Commands are human- or automation-triggered and rare, so every send
//! opens its own connection instead of maintaining a persistent one — no
//! reconnect logic, no keep-alive, no pooling.

use std::future::Future;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Where the beamer lives. Fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct DeviceEndpoint {
    pub host: String,
    pub port: u16,
}

impl DeviceEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("write to {addr} failed: {source}")]
    Write {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("{phase} to {addr} timed out after {timeout:?}")]
    Timeout {
        phase: &'static str,
        addr: String,
        timeout: Duration,
    },
}

/// Seam between the dispatcher and the network. Production uses
/// [`TcpTransport`]; tests substitute a recording fake.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one payload over a fresh connection. The connection is closed
    /// on every exit path, including write failure.
    async fn send(&self, payload: &[u8]) -> Result<(), SessionError>;

    /// Connectivity check: connect within the timeout, close without writing.
    /// Health reporting only — `send` never probes first.
    async fn probe(&self) -> bool;
}

/// Bound on connect and write. Also the probe timeout.
pub const IO_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TcpTransport {
    endpoint: DeviceEndpoint,
    io_timeout: Duration,
}

impl TcpTransport {
    pub fn new(endpoint: DeviceEndpoint) -> Self {
        Self {
            endpoint,
            io_timeout: IO_TIMEOUT,
        }
    }

    pub fn with_timeout(endpoint: DeviceEndpoint, io_timeout: Duration) -> Self {
        Self {
            endpoint,
            io_timeout,
        }
    }

    async fn connect(&self) -> Result<TcpStream, SessionError> {
        let addr = self.endpoint.addr();
        self.connect_with(TcpStream::connect(addr)).await
    }

    async fn connect_with<F>(&self, connecting: F) -> Result<TcpStream, SessionError>
    where
        F: Future<Output = io::Result<TcpStream>>,
    {
        let addr = self.endpoint.addr();
        match timeout(self.io_timeout, connecting).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(SessionError::Connect { addr, source }),
            Err(_) => Err(SessionError::Timeout {
                phase: "connect",
                addr,
                timeout: self.io_timeout,
            }),
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&self, payload: &[u8]) -> Result<(), SessionError> {
        let addr = self.endpoint.addr();
        // Dropping the stream closes it, so any early return below releases
        // the connection.
        let mut stream = self.connect().await?;
        match timeout(self.io_timeout, stream.write_all(payload)).await {
            Ok(Ok(())) => {}
            Ok(Err(source)) => return Err(SessionError::Write { addr, source }),
            Err(_) => {
                return Err(SessionError::Timeout {
                    phase: "write",
                    addr,
                    timeout: self.io_timeout,
                })
            }
        }
        // Flush the FIN; a close error after a complete write is not a
        // delivery failure.
        let _ = stream.shutdown().await;
        debug!(%addr, len = payload.len(), "payload delivered");
        Ok(())
    }

    async fn probe(&self) -> bool {
        match self.connect().await {
            Ok(_stream) => true,
            Err(error) => {
                debug!(%error, "probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    async fn local_listener() -> (TcpListener, DeviceEndpoint) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        (listener, DeviceEndpoint::new("127.0.0.1", port))
    }

    #[tokio::test]
    async fn send_delivers_payload_and_closes() {
        let (listener, endpoint) = local_listener().await;
        let transport = TcpTransport::new(endpoint);

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).await.expect("read");
            buf
        });

        transport
            .send(&[0x05, 0x00, 0x06, 0x00, 0x00, 0x03, 0x00, 0xfa, 0x13])
            .await
            .expect("send");

        // read_to_end only returns once the peer closed the connection
        let seen = server.await.expect("join");
        assert_eq!(seen.len(), 9);
        assert_eq!(&seen[7..], &[0xfa, 0x13]);
    }

    #[tokio::test]
    async fn send_to_refused_port_fails_without_panicking() {
        let (listener, endpoint) = local_listener().await;
        drop(listener);
        let transport = TcpTransport::new(endpoint);

        let err = transport.send(&[0x00]).await.expect_err("refused");
        assert!(matches!(err, SessionError::Connect { .. }));
    }

    #[tokio::test]
    async fn probe_reports_reachable_listener() {
        let (listener, endpoint) = local_listener().await;
        let transport = TcpTransport::new(endpoint);
        assert!(transport.probe().await);
        drop(listener);
    }

    #[tokio::test]
    async fn probe_returns_false_within_timeout_bound() {
        let (listener, endpoint) = local_listener().await;
        drop(listener);
        let io_timeout = Duration::from_millis(500);
        let transport = TcpTransport::with_timeout(endpoint, io_timeout);

        let started = Instant::now();
        assert!(!transport.probe().await);
        // Refused connections return early; either way the call must stay
        // under the timeout plus scheduling tolerance.
        assert!(started.elapsed() < io_timeout + Duration::from_millis(500));
    }

    // Paused time: the connect future never resolves, modelling a
    // black-holed endpoint, and the timer fires without real waiting.
    #[tokio::test(start_paused = true)]
    async fn never_accepting_endpoint_surfaces_a_connect_timeout() {
        let transport = TcpTransport::with_timeout(
            DeviceEndpoint::new("192.0.2.1", 41794),
            Duration::from_millis(200),
        );

        let err = transport
            .connect_with(std::future::pending::<io::Result<TcpStream>>())
            .await
            .expect_err("must time out");
        assert!(matches!(
            err,
            SessionError::Timeout {
                phase: "connect",
                ..
            }
        ));
    }
}
