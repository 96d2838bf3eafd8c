/// Backend submodules for the Socket.IO connection
///
/// - `connection`: TLS setup, WebSocket dial and the Socket.IO auth handshake
/// - `handlers`: UI action handling and inbound packet routing
/// - `main_loop`: the event loop with fixed-delay reconnection
mod connection;
mod handlers;
mod main_loop;

// Re-export the main backend entry points
pub use main_loop::run_backend;

#[cfg(test)]
pub use connection::create_tls_connector;
