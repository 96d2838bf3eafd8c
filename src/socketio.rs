//! Engine.IO v4 / Socket.IO v4 text packet codec for the WebSocket transport.
//!
//! Every WebSocket text frame carries exactly one Engine.IO packet. Engine.IO
//! `message` packets wrap one Socket.IO packet:
//! `<type>[<attachments>-][<nsp>,][<ackId>][<json>]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Engine.IO protocol revision we speak.
pub const ENGINE_IO_VERSION: u8 = 4;

/// Engine.IO pong reply, sent for every ping.
pub const PONG: &str = "3";

static SOCKET_PACKET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([0-6])(?:(\d+)-)?(?:(/[^,]*),)?(\d+)?(.*)$")
        .expect("socket.io packet pattern is valid")
});

/// Handshake data carried by the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInfo {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(OpenInfo),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    /// Namespace connection accepted
    Connect { sid: Option<String> },
    /// Server closed the namespace
    Disconnect,
    /// Named event with its first argument (or `Null` when there is none)
    Event {
        name: String,
        payload: Value,
        ack_id: Option<u64>,
    },
    Ack { ack_id: Option<u64>, args: Value },
    /// Namespace connection refused (`connect_error`)
    ConnectError { message: String },
    /// Binary packets are never used by this server
    Binary,
}

/// Decode one WebSocket text frame.
pub fn decode_frame(frame: &str) -> Result<EnginePacket> {
    let mut chars = frame.chars();
    let kind = chars
        .next()
        .ok_or_else(|| ClientError::Protocol("empty frame".into()))?;
    let body = chars.as_str();

    Ok(match kind {
        '0' => EnginePacket::Open(serde_json::from_str(body)?),
        '1' => EnginePacket::Close,
        '2' => EnginePacket::Ping(body.to_string()),
        '3' => EnginePacket::Pong(body.to_string()),
        '4' => EnginePacket::Message(decode_socket_packet(body)?),
        '5' => EnginePacket::Upgrade,
        '6' => EnginePacket::Noop,
        other => {
            return Err(ClientError::Protocol(format!(
                "unknown engine.io packet type '{}'",
                other
            )))
        }
    })
}

fn decode_socket_packet(packet: &str) -> Result<SocketPacket> {
    let caps = SOCKET_PACKET_RE
        .captures(packet)
        .ok_or_else(|| ClientError::Protocol(format!("bad socket.io packet: {}", packet)))?;

    if let Some(nsp) = caps.get(3) {
        if nsp.as_str() != "/" {
            return Err(ClientError::Protocol(format!(
                "unexpected namespace {}",
                nsp.as_str()
            )));
        }
    }

    let ack_id = caps.get(4).and_then(|m| m.as_str().parse::<u64>().ok());
    let data = caps.get(5).map(|m| m.as_str()).unwrap_or("");
    let json: Option<Value> = if data.is_empty() {
        None
    } else {
        Some(serde_json::from_str(data)?)
    };

    Ok(match &caps[1] {
        "0" => SocketPacket::Connect {
            sid: json
                .as_ref()
                .and_then(|v| v.get("sid"))
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        "1" => SocketPacket::Disconnect,
        "2" => {
            let mut args = match json {
                Some(Value::Array(args)) => args.into_iter(),
                _ => return Err(ClientError::Protocol("event without argument array".into())),
            };
            let name = match args.next() {
                Some(Value::String(name)) => name,
                _ => return Err(ClientError::Protocol("event without a name".into())),
            };
            SocketPacket::Event {
                name,
                payload: args.next().unwrap_or(Value::Null),
                ack_id,
            }
        }
        "3" => SocketPacket::Ack {
            ack_id,
            args: json.unwrap_or(Value::Null),
        },
        "4" => SocketPacket::ConnectError {
            message: connect_error_message(json),
        },
        _ => SocketPacket::Binary,
    })
}

fn connect_error_message(json: Option<Value>) -> String {
    match json {
        Some(Value::String(s)) => s,
        Some(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("connection refused")
            .to_string(),
        _ => "connection refused".to_string(),
    }
}

/// `40{auth}`: connect to the default namespace with an auth payload.
pub fn encode_connect(auth: &Value) -> String {
    format!("40{}", auth)
}

/// `42["name", payload]`
pub fn encode_event(name: &str, payload: Option<&Value>) -> String {
    let args = match payload {
        Some(p) => Value::Array(vec![Value::String(name.to_string()), p.clone()]),
        None => Value::Array(vec![Value::String(name.to_string())]),
    };
    format!("42{}", args)
}

/// `41`: leave the default namespace.
pub fn encode_disconnect() -> &'static str {
    "41"
}

/// Build the WebSocket endpoint for a server base URL.
///
/// `https://host/` becomes `wss://host/socket.io/?EIO=4&transport=websocket`.
pub fn websocket_url(server: &str) -> Result<String> {
    let server = server.trim();
    let (scheme, rest) = server
        .split_once("://")
        .ok_or_else(|| ClientError::InvalidUrl(server.to_string()))?;
    let ws_scheme = match scheme.to_ascii_lowercase().as_str() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(ClientError::InvalidUrl(format!("unsupported scheme {}", other))),
    };
    let host_and_path = rest.trim_end_matches('/');
    if host_and_path.is_empty() {
        return Err(ClientError::InvalidUrl(server.to_string()));
    }
    Ok(format!(
        "{}://{}/socket.io/?EIO={}&transport=websocket",
        ws_scheme, host_and_path, ENGINE_IO_VERSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_open_packet() {
        let frame = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        match decode_frame(frame).unwrap() {
            EnginePacket::Open(info) => {
                assert_eq!(info.sid, "abc");
                assert_eq!(info.ping_interval, 25000);
                assert_eq!(info.ping_timeout, 20000);
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }

    #[test]
    fn test_decode_ping() {
        assert_eq!(decode_frame("2").unwrap(), EnginePacket::Ping(String::new()));
    }

    #[test]
    fn test_decode_connect_ack() {
        let packet = decode_frame(r#"40{"sid":"xyz"}"#).unwrap();
        assert_eq!(
            packet,
            EnginePacket::Message(SocketPacket::Connect {
                sid: Some("xyz".into())
            })
        );
    }

    #[test]
    fn test_decode_connect_error() {
        let packet = decode_frame(r#"44{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(
            packet,
            EnginePacket::Message(SocketPacket::ConnectError {
                message: "Invalid credentials".into()
            })
        );
    }

    #[test]
    fn test_decode_event_with_payload() {
        let packet = decode_frame(r#"42["updateOwnDares",[{"id":"a","text":"x"}]]"#).unwrap();
        match packet {
            EnginePacket::Message(SocketPacket::Event { name, payload, ack_id }) => {
                assert_eq!(name, "updateOwnDares");
                assert_eq!(payload, json!([{ "id": "a", "text": "x" }]));
                assert_eq!(ack_id, None);
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }

    #[test]
    fn test_decode_event_without_payload() {
        match decode_frame(r#"42["clearChat"]"#).unwrap() {
            EnginePacket::Message(SocketPacket::Event { name, payload, .. }) => {
                assert_eq!(name, "clearChat");
                assert!(payload.is_null());
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }

    #[test]
    fn test_decode_event_with_ack_id() {
        match decode_frame(r#"4212["revealResult","dance"]"#).unwrap() {
            EnginePacket::Message(SocketPacket::Event { ack_id, payload, .. }) => {
                assert_eq!(ack_id, Some(12));
                assert_eq!(payload, json!("dance"));
            }
            other => panic!("unexpected packet: {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_foreign_namespace() {
        assert!(decode_frame(r#"42/admin,["x"]"#).is_err());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_frame("").is_err());
        assert!(decode_frame("9").is_err());
        assert!(decode_frame("42not json").is_err());
    }

    #[test]
    fn test_encode_connect_and_event() {
        assert_eq!(
            encode_connect(&json!({ "id": "betu" })),
            r#"40{"id":"betu"}"#
        );
        assert_eq!(encode_event("revealItem", None), r#"42["revealItem"]"#);
        assert_eq!(
            encode_event("addDare", Some(&json!("jump"))),
            r#"42["addDare","jump"]"#
        );
    }

    #[test]
    fn test_websocket_url() {
        assert_eq!(
            websocket_url("https://truthanddareserver.onrender.com/").unwrap(),
            "wss://truthanddareserver.onrender.com/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            websocket_url("http://localhost:3000").unwrap(),
            "ws://localhost:3000/socket.io/?EIO=4&transport=websocket"
        );
        assert!(websocket_url("localhost:3000").is_err());
        assert!(websocket_url("ftp://host").is_err());
        assert!(websocket_url("https://").is_err());
    }
}
