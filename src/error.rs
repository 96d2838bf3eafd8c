//! Crate-level error type for the network, codec, config and credential layers.
//!
//! UI-facing validation keeps returning plain `String` messages; everything
//! below the channel boundary propagates `ClientError` with `?`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("malformed packet: {0}")]
    Protocol(String),

    #[error("authentication rejected: {0}")]
    AuthRejected(String),

    #[error("handshake timed out")]
    HandshakeTimeout,

    #[error("connection closed: {0}")]
    Closed(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
