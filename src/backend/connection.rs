//! Connection establishment for the game server.
//!
//! Dials the WebSocket endpoint, waits for the Engine.IO `open` packet and
//! authenticates on the default namespace.

use futures_util::{SinkExt, StreamExt};
use rustls::RootCertStore;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};

use crate::config::ConnectionConfig;
use crate::error::{ClientError, Result};
use crate::socketio::{self, EnginePacket, OpenInfo, SocketPacket};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A live, authenticated connection.
pub struct Link {
    pub ws: WsStream,
    last_ping: Instant,
    ping_deadline: Duration,
}

impl Link {
    fn new(ws: WsStream, info: &OpenInfo) -> Self {
        Self {
            ws,
            last_ping: Instant::now(),
            ping_deadline: Duration::from_millis(info.ping_interval + info.ping_timeout),
        }
    }

    pub fn saw_ping(&mut self) {
        self.last_ping = Instant::now();
    }

    /// The server stopped pinging: treat the connection as dead.
    pub fn is_stale(&self) -> bool {
        self.last_ping.elapsed() > self.ping_deadline
    }

    pub async fn send_frame(&mut self, frame: String) -> Result<()> {
        self.ws.send(Message::text(frame)).await?;
        Ok(())
    }

    /// Leave the namespace and close the socket, ignoring failures.
    pub async fn close(mut self) {
        let _ = self
            .ws
            .send(Message::text(socketio::encode_disconnect()))
            .await;
        let _ = self.ws.close(None).await;
    }
}

/// Create a TLS connector trusting webpki roots plus the platform store
pub fn create_tls_connector() -> Result<Connector> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let native = rustls_native_certs::load_native_certs();
    for err in &native.errors {
        tracing::debug!("Skipping native certificates: {}", err);
    }
    let (added, ignored) = root_store.add_parsable_certificates(native.certs);
    tracing::debug!(added, ignored, "Loaded native root certificates");

    if root_store.is_empty() {
        return Err(ClientError::Tls("no root certificates available".into()));
    }

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Connector::Rustls(Arc::new(config)))
}

/// Dial the server and authenticate as `id`.
///
/// # Errors
/// `AuthRejected` when the server answers with `connect_error`,
/// `HandshakeTimeout` when either phase exceeds the configured timeout, and
/// transport errors otherwise.
pub async fn establish_link(config: &ConnectionConfig, id: &str, password: &str) -> Result<Link> {
    let url = socketio::websocket_url(&config.server_url)?;
    let connector = if url.starts_with("wss://") {
        Some(create_tls_connector()?)
    } else {
        Some(Connector::Plain)
    };

    let (mut ws, _response) = timeout(
        config.handshake_timeout,
        connect_async_tls_with_config(url.as_str(), None, true, connector),
    )
    .await
    .map_err(|_| ClientError::HandshakeTimeout)??;

    let info = timeout(config.handshake_timeout, authenticate(&mut ws, id, password))
        .await
        .map_err(|_| ClientError::HandshakeTimeout)??;

    tracing::debug!(sid = %info.sid, "Engine.IO session opened");
    Ok(Link::new(ws, &info))
}

async fn authenticate(ws: &mut WsStream, id: &str, password: &str) -> Result<OpenInfo> {
    let info = loop {
        match next_packet(ws).await? {
            EnginePacket::Open(info) => break info,
            EnginePacket::Noop => continue,
            other => {
                return Err(ClientError::Protocol(format!(
                    "expected open packet, got {:?}",
                    other
                )))
            }
        }
    };

    let auth = json!({ "id": id, "password": password });
    ws.send(Message::text(socketio::encode_connect(&auth))).await?;

    loop {
        match next_packet(ws).await? {
            EnginePacket::Ping(data) => {
                ws.send(Message::text(format!("{}{}", socketio::PONG, data)))
                    .await?;
            }
            EnginePacket::Message(SocketPacket::Connect { .. }) => return Ok(info),
            EnginePacket::Message(SocketPacket::ConnectError { message }) => {
                return Err(ClientError::AuthRejected(message))
            }
            EnginePacket::Close => {
                return Err(ClientError::Closed("server closed during handshake".into()))
            }
            _ => continue,
        }
    }
}

/// Read the next Engine.IO packet. WebSocket-level pings are answered by
/// tungstenite itself.
pub async fn next_packet(ws: &mut WsStream) -> Result<EnginePacket> {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => return socketio::decode_frame(text.as_str()),
            Some(Ok(Message::Close(frame))) => {
                let reason = frame
                    .map(|f| f.reason.to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "socket closed".to_string());
                return Err(ClientError::Closed(reason));
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(e.into()),
            None => return Err(ClientError::Closed("socket closed".into())),
        }
    }
}
