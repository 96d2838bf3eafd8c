//! Backend main event loop with fixed-delay reconnection.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::time::timeout;

use super::connection::{self, Link};
use super::handlers;
use crate::config::ConnectionConfig;
use crate::protocol::{BackendAction, GuiEvent};

/// How long one loop iteration waits on the socket before checking for actions.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything the backend thread owns.
pub struct BackendState {
    pub config: ConnectionConfig,
    pub link: Option<Link>,
    /// Credentials of the current login, kept for reconnects
    pub login: Option<(String, String)>,
    /// When the next reconnect attempt is due
    pub retry_at: Option<Instant>,
}

impl BackendState {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            link: None,
            login: None,
            retry_at: None,
        }
    }

    pub fn schedule_retry(&mut self) {
        if self.login.is_some() {
            self.retry_at = Some(Instant::now() + self.config.reconnect_delay);
        }
    }

    fn retry_due(&self) -> bool {
        self.retry_at.is_some_and(|at| Instant::now() >= at)
    }

    /// Drop a broken link, tell the UI, and schedule a reconnect.
    pub fn lose_link(&mut self, event_tx: &Sender<GuiEvent>, reason: String) {
        self.link = None;
        tracing::info!("Connection lost: {}", reason);
        let _ = event_tx.send(GuiEvent::Disconnected(reason));
        self.schedule_retry();
    }

    pub async fn close_link(&mut self) {
        if let Some(link) = self.link.take() {
            link.close().await;
        }
    }
}

/// Run the backend event loop on a tokio runtime. Returns once the UI drops
/// its action sender.
pub fn run_backend(
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
    config: ConnectionConfig,
) {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(async move {
        let mut state = BackendState::new(config);

        loop {
            // Check for actions from the UI (non-blocking)
            loop {
                match action_rx.try_recv() {
                    Ok(action) => {
                        handlers::handle_backend_action(action, &mut state, &event_tx).await
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        state.close_link().await;
                        return;
                    }
                }
            }

            if let Some(link) = state.link.as_mut() {
                match timeout(POLL_INTERVAL, connection::next_packet(&mut link.ws)).await {
                    Ok(Ok(packet)) => {
                        handlers::handle_packet(packet, &mut state, &event_tx).await;
                    }
                    Ok(Err(e)) => {
                        state.lose_link(&event_tx, e.to_string());
                    }
                    Err(_) => {
                        // Timeout - normal, unless the server went silent
                        if link.is_stale() {
                            state.lose_link(&event_tx, "Ping timeout".into());
                        }
                    }
                }
            } else if state.retry_due() {
                handlers::connect(&mut state, &event_tx).await;
            } else {
                // No connection, sleep a bit to avoid busy-looping
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }
    });
}
