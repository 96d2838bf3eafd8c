//! Core TruthDareApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::backend::run_backend;
use crate::config::{load_settings, save_settings, Settings};
use crate::credentials::{open_store, CredentialStore};
use crate::dialog_manager::DialogManager;
use crate::logging::ChatLogger;
use crate::protocol::{BackendAction, GuiEvent, ItemKind};
use crate::session::Session;
use crate::state::ClientState;
use crate::ui;

/// Delay between logout and the fresh login dialog.
pub const LOGIN_PROMPT_DELAY: Duration = Duration::from_millis(500);

/// Text typed into the add/send inputs.
#[derive(Debug, Default)]
pub struct ComposeInputs {
    pub dare: String,
    pub truth: String,
    pub chat: String,
}

impl ComposeInputs {
    pub fn for_kind(&mut self, kind: ItemKind) -> &mut String {
        match kind {
            ItemKind::Dare => &mut self.dare,
            ItemKind::Truth => &mut self.truth,
        }
    }
}

pub struct TruthDareApp {
    // Rendered state (lists, chat, banners, reveal card)
    pub state: ClientState,
    pub session: Session,
    pub settings: Settings,
    pub credentials: Box<dyn CredentialStore>,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    pub input: ComposeInputs,

    // Dialogs - managed centrally by DialogManager
    pub dialogs: DialogManager,

    pub chat_logger: Option<ChatLogger>,

    /// Reopen the login dialog at this instant (set by logout)
    pub login_prompt_at: Option<Instant>,
    /// Window focus as of the previous frame
    pub was_focused: bool,
    pub(super) window_title: String,
    /// Write settings to disk on change and exit
    persist_settings: bool,
}

impl TruthDareApp {
    pub(super) fn get_theme(&self) -> ui::theme::TruthDareTheme {
        ui::theme::TruthDareTheme::for_mode(self.settings.dark_mode)
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings().unwrap_or_default();

        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        // Spawn the backend thread
        let connection = settings.connection();
        thread::spawn(move || {
            run_backend(action_rx, event_tx, connection);
        });

        ui::theme::apply_app_style(&cc.egui_ctx, settings.dark_mode);

        let credentials = open_store(settings.password_storage);
        let chat_logger = if settings.log_chat {
            ChatLogger::new()
                .map_err(|e| tracing::warn!("Chat transcripts disabled: {}", e))
                .ok()
        } else {
            None
        };

        let mut app = Self::with_parts(settings, credentials, action_tx, event_rx, chat_logger);
        app.persist_settings = true;
        app
    }

    /// Assemble the app around an existing backend channel pair and resume
    /// the stored login, or ask for one.
    pub fn with_parts(
        settings: Settings,
        credentials: Box<dyn CredentialStore>,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
        chat_logger: Option<ChatLogger>,
    ) -> Self {
        let cached = credentials.read();
        let mut app = Self {
            state: ClientState::new(&settings),
            session: Session::new(cached),
            settings,
            credentials,
            action_tx,
            event_rx,
            input: ComposeInputs::default(),
            dialogs: DialogManager::new(),
            chat_logger,
            login_prompt_at: None,
            was_focused: true,
            window_title: String::new(),
            persist_settings: false,
        };

        match app.session.resume() {
            Some(action) => {
                if let Some(auth) = app.session.auth() {
                    tracing::info!(user = %auth.id, "Resuming stored login");
                }
                app.send(action);
            }
            None => app.dialogs.open_login(None),
        }
        app
    }

    pub(crate) fn send(&self, action: BackendAction) {
        if self.action_tx.send(action).is_err() {
            tracing::error!("Backend thread is gone");
        }
    }

    pub(crate) fn save_settings(&self) {
        if !self.persist_settings {
            return;
        }
        if let Err(e) = save_settings(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    /// Send an action only while a confirmed login exists.
    pub(crate) fn send_if_logged_in(&self, action: BackendAction) {
        if self.session.is_logged_in() {
            self.send(action);
        } else {
            tracing::debug!("Ignoring {:?} while logged out", action);
        }
    }

    /// Forget the credential, drop the connection and clear everything on
    /// screen. The login dialog returns after `LOGIN_PROMPT_DELAY`.
    pub fn logout(&mut self, now: Instant) {
        tracing::info!("Logging out");
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("Failed to clear stored login: {}", e);
        }
        self.send(BackendAction::Disconnect);
        self.session.teardown();
        self.state.reset();
        self.input = ComposeInputs::default();
        self.dialogs.close_session_dialogs();
        self.login_prompt_at = Some(now + LOGIN_PROMPT_DELAY);
    }

    /// Window became visible/focused again: refresh or reconnect.
    pub fn resume(&mut self) {
        if self.session.is_logged_in() {
            tracing::debug!("Window focused, requesting resume");
            self.send(BackendAction::Resume);
        }
    }

    /// Fire deadline-driven work (the delayed login prompt).
    pub fn tick(&mut self, now: Instant) {
        if self.login_prompt_at.is_some_and(|at| now >= at) {
            self.login_prompt_at = None;
            self.dialogs.open_login(None);
        }
    }
}

impl Drop for TruthDareApp {
    fn drop(&mut self) {
        // Persist settings on exit
        self.save_settings();
    }
}
