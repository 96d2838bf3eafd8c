//! Integration tests for truthdare-client
//!
//! These tests drive the app the way the UI does, with the backend replaced
//! by the two channel ends, and check what reaches the backend, the
//! credential store and the rendered state.

#[cfg(test)]
mod integration_tests {
    use crate::app::TruthDareApp;
    use crate::config::Settings;
    use crate::credentials::{CredentialStore, MemoryCredentialStore};
    use crate::events::LOGIN_FAILED;
    use crate::logging::ChatLogger;
    use crate::protocol::{
        BackendAction, ChatMessage, CurrentUser, GuiEvent, InitPayload, Item, ItemKind,
        ServerEvent,
    };
    use crate::session::ConnectionStatus;
    use crate::ui::dialogs::{ConfirmKind, DialogAction};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::time::{Duration, Instant};

    struct Harness {
        app: TruthDareApp,
        actions: Receiver<BackendAction>,
        events: Sender<GuiEvent>,
    }

    impl Harness {
        fn new(store: MemoryCredentialStore) -> Self {
            Self::with_logger(store, None)
        }

        fn with_logger(store: MemoryCredentialStore, logger: Option<ChatLogger>) -> Self {
            let (action_tx, action_rx) = unbounded::<BackendAction>();
            let (event_tx, event_rx) = unbounded::<GuiEvent>();
            let app = TruthDareApp::with_parts(
                Settings::default(),
                Box::new(store),
                action_tx,
                event_rx,
                logger,
            );
            Self {
                app,
                actions: action_rx,
                events: event_tx,
            }
        }

        fn push(&mut self, event: GuiEvent) {
            self.events.send(event).unwrap();
            self.app.process_events(Instant::now());
        }

        fn sent(&self) -> Vec<BackendAction> {
            self.actions.try_iter().collect()
        }

        /// Fresh login accepted by the server.
        fn logged_in() -> Self {
            let mut h = Harness::new(MemoryCredentialStore::new());
            h.app.handle_dialog_action(
                DialogAction::Login {
                    id: "betu".into(),
                    password: "pw".into(),
                },
                Instant::now(),
            );
            h.push(GuiEvent::Connected);
            h.push(init(vec![Item::new("d1", "Sing")], vec![]));
            let _ = h.sent();
            h
        }
    }

    fn stored(id: &str, password: &str, username: &str) -> MemoryCredentialStore {
        let mut store = MemoryCredentialStore::new();
        store.save(id, password, username).unwrap();
        store
    }

    fn init(dares: Vec<Item>, truths: Vec<Item>) -> GuiEvent {
        GuiEvent::Server(ServerEvent::Init(InitPayload {
            current_user: CurrentUser {
                id: "betu".into(),
                username: "Betu".into(),
            },
            dares,
            truths,
            messages: Vec::new(),
        }))
    }

    #[test]
    fn test_startup_without_login_prompts() {
        let h = Harness::new(MemoryCredentialStore::new());
        assert!(h.app.dialogs.is_login_open());
        assert!(h.sent().is_empty());
    }

    #[test]
    fn test_startup_with_stored_login_connects() {
        let h = Harness::new(stored("betu", "pw", "Betu"));
        assert!(!h.app.dialogs.is_login_open());
        assert_eq!(
            h.sent(),
            vec![BackendAction::Connect {
                id: "betu".into(),
                password: "pw".into()
            }]
        );
        assert_eq!(h.app.session.connection, ConnectionStatus::Connecting);
    }

    #[test]
    fn test_fresh_login_persists_after_snapshot() {
        let mut h = Harness::new(MemoryCredentialStore::new());
        h.app.handle_dialog_action(
            DialogAction::Login {
                id: "betu".into(),
                password: "pw".into(),
            },
            Instant::now(),
        );
        assert!(matches!(h.sent().as_slice(), [BackendAction::Connect { .. }]));
        assert!(h.app.credentials.read().is_none());

        h.push(GuiEvent::Connected);
        h.push(init(vec![Item::new("d1", "Sing")], vec![Item::new("t1", "Why?")]));

        let record = h.app.credentials.read().unwrap();
        assert_eq!(record.id, "betu");
        assert_eq!(record.password, "pw");
        assert_eq!(record.username, "Betu");
        assert!(record.is_logged_in);
        assert_eq!(h.app.state.heading(), "Your Dares & Truths (Betu)");
        assert_eq!(h.app.state.dares.len(), 1);
        assert_eq!(h.app.state.truths.len(), 1);
    }

    #[test]
    fn test_rejected_first_login_reprompts() {
        let mut h = Harness::new(MemoryCredentialStore::new());
        h.app.handle_dialog_action(
            DialogAction::Login {
                id: "betu".into(),
                password: "wrong".into(),
            },
            Instant::now(),
        );
        let _ = h.sent();

        h.push(GuiEvent::ConnectError("Invalid credentials".into()));
        assert_eq!(h.sent(), vec![BackendAction::Disconnect]);
        assert_eq!(h.app.dialogs.alerts.len(), 1);
        assert_eq!(h.app.dialogs.alerts[0].message, LOGIN_FAILED);
        assert!(h.app.dialogs.is_login_open());
        assert!(h.app.credentials.read().is_none());
    }

    #[test]
    fn test_rejection_with_stored_login_is_transient() {
        let mut h = Harness::new(stored("betu", "pw", "Betu"));
        let _ = h.sent();

        h.push(GuiEvent::ConnectError("server restarting".into()));
        assert!(h.sent().is_empty());
        assert!(h.app.dialogs.alerts.is_empty());
        assert!(h.app.credentials.read().is_some());
        assert!(h.app.session.is_logged_in());
    }

    #[test]
    fn test_list_updates_keep_unchanged_entries() {
        let mut h = Harness::logged_in();
        let node = h.app.state.dares.node_of("d1").unwrap();

        h.push(GuiEvent::Server(ServerEvent::UpdateOwnDares(vec![
            Item::new("d1", "Sing"),
            Item::new("d2", "Dance"),
        ])));
        assert_eq!(h.app.state.dares.node_of("d1"), Some(node));
        assert_eq!(h.app.state.dares.len(), 2);

        h.push(GuiEvent::Server(ServerEvent::UpdateOwnDares(vec![Item::new(
            "d2", "Dance",
        )])));
        assert!(h.app.state.dares.get("d1").is_none());
        assert_eq!(h.app.state.dares.len(), 1);
    }

    #[test]
    fn test_add_item_trims_and_clears_input() {
        let mut h = Harness::logged_in();
        h.app.input.dare = "  Jump ".into();
        h.app.submit_item(ItemKind::Dare);
        assert_eq!(
            h.sent(),
            vec![BackendAction::AddItem {
                kind: ItemKind::Dare,
                text: "Jump".into()
            }]
        );
        assert!(h.app.input.dare.is_empty());

        h.app.input.truth = "   ".into();
        h.app.submit_item(ItemKind::Truth);
        assert!(h.sent().is_empty());
    }

    #[test]
    fn test_long_item_and_chat_are_sent_unchanged() {
        let mut h = Harness::logged_in();
        let long = "x".repeat(600);
        h.app.input.dare = long.clone();
        h.app.submit_item(ItemKind::Dare);
        h.app.input.chat = long.clone();
        h.app.submit_chat();
        assert_eq!(
            h.sent(),
            vec![
                BackendAction::AddItem {
                    kind: ItemKind::Dare,
                    text: long.clone()
                },
                BackendAction::SendMessage(long)
            ]
        );
    }

    #[test]
    fn test_actions_ignored_while_logged_out() {
        let mut h = Harness::new(MemoryCredentialStore::new());
        h.app.input.dare = "Jump".into();
        h.app.submit_item(ItemKind::Dare);
        h.app.input.chat = "hi".into();
        h.app.submit_chat();
        h.app.handle_dialog_action(
            DialogAction::Confirmed(ConfirmKind::ClearChat),
            Instant::now(),
        );
        assert!(h.sent().is_empty());
        assert_eq!(h.app.input.dare, "Jump");
    }

    #[test]
    fn test_edit_flow_opens_prefilled_dialog() {
        let mut h = Harness::logged_in();
        let action = h.app.state.dares.get("d1").unwrap().edit_action(ItemKind::Dare);
        h.app.handle_entry_action(action);
        let dialog = h.app.dialogs.edit_item_dialog.as_ref().unwrap();
        assert_eq!(dialog.text_input, "Sing");

        h.app.handle_dialog_action(
            DialogAction::EditItem {
                kind: ItemKind::Dare,
                id: "d1".into(),
                new_text: "Sing loudly".into(),
            },
            Instant::now(),
        );
        assert_eq!(
            h.sent(),
            vec![BackendAction::EditItem {
                kind: ItemKind::Dare,
                id: "d1".into(),
                new_text: "Sing loudly".into()
            }]
        );
    }

    #[test]
    fn test_delete_sends_immediately() {
        let mut h = Harness::logged_in();
        let action = h.app.state.dares.get("d1").unwrap().delete_action(ItemKind::Dare);
        h.app.handle_entry_action(action);
        assert_eq!(
            h.sent(),
            vec![BackendAction::DeleteItem {
                kind: ItemKind::Dare,
                id: "d1".into()
            }]
        );
    }

    #[test]
    fn test_username_change_is_persisted() {
        let mut h = Harness::logged_in();
        h.app.handle_dialog_action(DialogAction::ChangeUsername("Betu2".into()), Instant::now());
        assert_eq!(h.sent(), vec![BackendAction::EditUsername("Betu2".into())]);

        h.push(GuiEvent::Server(ServerEvent::UsernameUpdated("Betu2".into())));
        assert_eq!(h.app.credentials.read().unwrap().username, "Betu2");
        assert_eq!(h.app.state.heading(), "Your Dares & Truths (Betu2)");
    }

    #[test]
    fn test_logout_clears_and_reprompts_after_delay() {
        let mut h = Harness::logged_in();
        h.app.state.chat.push(
            ChatMessage {
                username: "Puchu".into(),
                message: "hi".into(),
            },
            true,
        );
        let now = Instant::now();
        h.app
            .handle_dialog_action(DialogAction::Confirmed(ConfirmKind::Logout), now);

        assert_eq!(h.sent(), vec![BackendAction::Disconnect]);
        assert!(h.app.credentials.read().is_none());
        assert!(h.app.state.dares.is_empty());
        assert!(h.app.state.chat.is_empty());
        assert_eq!(h.app.state.heading(), "Your Dares & Truths");
        assert!(!h.app.dialogs.is_login_open());

        h.app.tick(now + Duration::from_millis(400));
        assert!(!h.app.dialogs.is_login_open());
        h.app.tick(now + Duration::from_millis(500));
        assert!(h.app.dialogs.is_login_open());
    }

    #[test]
    fn test_pushes_queued_before_logout_are_dropped() {
        let mut h = Harness::logged_in();
        h.app.logout(Instant::now());
        let _ = h.sent();

        h.push(GuiEvent::Server(ServerEvent::UpdateOwnDares(vec![Item::new(
            "d2", "Late",
        )])));
        h.push(GuiEvent::Server(ServerEvent::NewMessage(ChatMessage {
            username: "Puchu".into(),
            message: "late".into(),
        })));
        assert!(h.app.state.dares.is_empty());
        assert!(h.app.state.chat.is_empty());
        assert!(h.app.credentials.read().is_none());
    }

    #[test]
    fn test_focus_resume_only_when_logged_in() {
        let mut h = Harness::new(MemoryCredentialStore::new());
        h.app.resume();
        assert!(h.sent().is_empty());

        let mut h = Harness::logged_in();
        h.app.resume();
        assert_eq!(h.sent(), vec![BackendAction::Resume]);
    }

    #[test]
    fn test_reveal_flow() {
        let mut h = Harness::logged_in();
        h.push(GuiEvent::Server(ServerEvent::RevealResult("Dance for 1 minute".into())));
        assert_eq!(
            h.app.state.reveal.as_ref().map(|r| r.text.as_str()),
            Some("Dance for 1 minute")
        );
    }

    #[test]
    fn test_chat_transcript_written() {
        let dir = std::env::temp_dir().join(format!("truthdare-it-logs-{}", std::process::id()));
        let logger = ChatLogger::with_dir(dir.clone()).unwrap();
        let mut h = Harness::with_logger(stored("betu", "pw", "Betu"), Some(logger));

        h.push(GuiEvent::Server(ServerEvent::NewMessage(ChatMessage {
            username: "Puchu".into(),
            message: "hello".into(),
        })));
        assert_eq!(h.app.state.chat.len(), 1);
        assert_eq!(h.app.state.chat.unread_count, 1);
        drop(h);

        let account_dir = dir.join("betu");
        let mut content = String::new();
        for _ in 0..50 {
            if let Some(Ok(entry)) = std::fs::read_dir(&account_dir)
                .ok()
                .and_then(|mut entries| entries.next())
            {
                content = std::fs::read_to_string(entry.path()).unwrap_or_default();
                if !content.is_empty() {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(content.ends_with("<Puchu> hello\n"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_tls_connector_creation() {
        assert!(crate::backend::create_tls_connector().is_ok());
    }
}
