//! Tokio transport for IRC connections.
//!
//! Thin framing layer over TCP or TLS. The core never touches this
//! directly: [`Client::run`](crate::Client::run) reads lines from here and
//! writes encoded commands back, CRLF appended by the codec.

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::TlsConnector;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::codec::LineCodec;
use crate::error::{ClientError, Result};
use crate::uri::ConnectionParams;

/// A framed connection to an IRC server.
#[allow(clippy::large_enum_variant)]
pub enum Transport {
    /// Plain TCP.
    Tcp {
        /// The framed stream.
        framed: Framed<TcpStream, LineCodec>,
    },
    /// TLS over TCP.
    Tls {
        /// The framed stream.
        framed: Framed<TlsStream<TcpStream>, LineCodec>,
    },
}

impl Transport {
    /// Connect over plain TCP.
    ///
    /// # Errors
    ///
    /// Fails on connect errors, or when `params.secured` is set: secured
    /// parameters must go through [`connect_tls`](Self::connect_tls).
    pub async fn connect(params: &ConnectionParams) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !params.secured,
            "secured connection requested; use connect_tls"
        );

        let stream = TcpStream::connect((params.host.as_str(), params.port))
            .await
            .with_context(|| format!("connecting to {}:{}", params.host, params.port))?;
        debug!(host = %params.host, port = params.port, "connected");

        Ok(Self::tcp(stream))
    }

    /// Connect with TLS. The caller supplies the connector: root-store
    /// and verification policy belong to the application.
    ///
    /// # Errors
    ///
    /// Fails on connect or handshake errors, or when the host is not a
    /// valid TLS server name.
    pub async fn connect_tls(
        connector: TlsConnector,
        params: &ConnectionParams,
    ) -> anyhow::Result<Self> {
        let stream = TcpStream::connect((params.host.as_str(), params.port))
            .await
            .with_context(|| format!("connecting to {}:{}", params.host, params.port))?;

        let name = ServerName::try_from(params.host.clone())
            .with_context(|| format!("invalid TLS server name: {}", params.host))?;
        let stream = connector
            .connect(name, stream)
            .await
            .context("TLS handshake failed")?;
        debug!(host = %params.host, port = params.port, "connected with TLS");

        Ok(Self::Tls {
            framed: Framed::new(stream, LineCodec::new()),
        })
    }

    /// Wrap an already-connected TCP stream.
    #[must_use]
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        Self::Tcp {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    /// Whether this transport is TLS-secured.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Tls { .. })
    }

    /// Read the next line, terminator stripped. `None` means the peer
    /// closed the connection.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, oversized lines, and invalid UTF-8.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        macro_rules! read_framed {
            ($framed:expr) => {
                match $framed.next().await {
                    Some(Ok(line)) => Ok(Some(line)),
                    Some(Err(e)) => Err(e),
                    None => Ok(None),
                }
            };
        }

        match self {
            Transport::Tcp { framed } => read_framed!(framed),
            Transport::Tls { framed } => read_framed!(framed),
        }
    }

    /// Write one line, CRLF appended by the codec.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        match self {
            Transport::Tcp { framed } => framed.send(line).await,
            Transport::Tls { framed } => framed.send(line).await,
        }
    }
}

fn enable_keepalive(stream: &TcpStream) -> Result<(), ClientError> {
    use socket2::{SockRef, TcpKeepalive};
    use std::time::Duration;

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));

    sock.set_tcp_keepalive(&keepalive)?;
    Ok(())
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Tcp { .. } => f.write_str("Transport::Tcp"),
            Transport::Tls { .. } => f.write_str("Transport::Tls"),
        }
    }
}
