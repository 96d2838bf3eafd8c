//! Data model shared by the UI and the backend, plus the channel protocol
//! between them.

use serde::{Deserialize, Deserializer, Serialize};

/// Which of the two per-user lists an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Dare,
    Truth,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Dare => "dare",
            ItemKind::Truth => "truth",
        }
    }

    /// Capitalised label used in headings and dialogs.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Dare => "Dare",
            ItemKind::Truth => "Truth",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dare or truth as owned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
}

/// Payload of the `init` snapshot pushed after authentication.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    pub current_user: CurrentUser,
    #[serde(default)]
    pub dares: Vec<Item>,
    #[serde(default)]
    pub truths: Vec<Item>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealNotice {
    pub username: String,
    pub item: String,
}

/// Typed union of everything the server pushes.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Init(InitPayload),
    UpdateOwnDares(Vec<Item>),
    UpdateOwnTruths(Vec<Item>),
    NewMessage(ChatMessage),
    RevealResult(String),
    RevealNotification(RevealNotice),
    ClearChat,
    UsernameUpdated(String),
    MessagesUpdated(Vec<ChatMessage>),
}

impl ServerEvent {
    /// Build a typed event from a Socket.IO event name and its first argument.
    ///
    /// Returns `Ok(None)` for event names this client does not handle.
    pub fn from_wire(
        name: &str,
        payload: serde_json::Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        use serde_json::from_value;
        let event = match name {
            "init" => ServerEvent::Init(from_value(payload)?),
            "updateOwnDares" => ServerEvent::UpdateOwnDares(from_value(payload)?),
            "updateOwnTruths" => ServerEvent::UpdateOwnTruths(from_value(payload)?),
            "newMessage" => ServerEvent::NewMessage(from_value(payload)?),
            "revealResult" => ServerEvent::RevealResult(from_value(payload)?),
            "revealNotification" => ServerEvent::RevealNotification(from_value(payload)?),
            "clearChat" => ServerEvent::ClearChat,
            "usernameUpdated" => ServerEvent::UsernameUpdated(from_value(payload)?),
            "messagesUpdated" => ServerEvent::MessagesUpdated(from_value(payload)?),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendAction {
    /// Open an authenticated connection, replacing any current one
    Connect { id: String, password: String },
    /// Close the connection and forget the login
    Disconnect,
    /// Window became visible again: refresh if connected, reconnect if not
    Resume,
    AddItem { kind: ItemKind, text: String },
    DeleteItem { kind: ItemKind, id: String },
    EditItem { kind: ItemKind, id: String, new_text: String },
    SendMessage(String),
    ClearChat,
    EditUsername(String),
    RevealItem,
    RequestFreshData,
}

impl BackendAction {
    /// Socket.IO event name and payload for actions that map to an emit.
    pub fn to_emit(&self) -> Option<(&'static str, Option<serde_json::Value>)> {
        use serde_json::json;
        let emit = match self {
            BackendAction::AddItem { kind, text } => {
                let name = match kind {
                    ItemKind::Dare => "addDare",
                    ItemKind::Truth => "addTruth",
                };
                (name, Some(json!(text)))
            }
            BackendAction::DeleteItem { kind, id } => {
                ("deleteItem", Some(json!({ "type": kind, "id": id })))
            }
            BackendAction::EditItem { kind, id, new_text } => (
                "editItem",
                Some(json!({ "type": kind, "id": id, "newText": new_text })),
            ),
            BackendAction::SendMessage(text) => ("sendMessage", Some(json!(text))),
            BackendAction::ClearChat => ("clearChat", None),
            BackendAction::EditUsername(name) => ("editUsername", Some(json!(name))),
            BackendAction::RevealItem => ("revealItem", None),
            BackendAction::RequestFreshData => ("requestFreshData", None),
            BackendAction::Connect { .. } | BackendAction::Disconnect | BackendAction::Resume => {
                return None
            }
        };
        Some(emit)
    }
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    /// Socket.IO handshake accepted
    Connected,
    /// Connection lost or closed
    Disconnected(String),
    /// Server refused the connection (`connect_error`)
    ConnectError(String),
    /// Transport-level problem worth surfacing in the status line
    Error(String),
    /// A push from the server
    Server(ServerEvent),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Str(s) => s,
        Repr::Int(n) => n.to_string(),
        Repr::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_init_payload_decodes() {
        let payload = json!({
            "currentUser": { "id": "betu", "username": "Betu" },
            "dares": [{ "id": "d1", "text": "sing" }],
            "truths": [],
            "messages": [{ "username": "Puchu", "message": "hi" }]
        });
        let event = ServerEvent::from_wire("init", payload).unwrap().unwrap();
        match event {
            ServerEvent::Init(init) => {
                assert_eq!(init.current_user.username, "Betu");
                assert_eq!(init.dares, vec![Item::new("d1", "sing")]);
                assert!(init.truths.is_empty());
                assert_eq!(init.messages.len(), 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_item_id_accepted() {
        let items: Vec<Item> = serde_json::from_value(json!([{ "id": 17, "text": "x" }])).unwrap();
        assert_eq!(items[0].id, "17");
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        assert_eq!(ServerEvent::from_wire("typing", json!(null)).unwrap(), None);
    }

    #[test]
    fn test_clear_chat_ignores_payload() {
        let event = ServerEvent::from_wire("clearChat", serde_json::Value::Null).unwrap();
        assert_eq!(event, Some(ServerEvent::ClearChat));
    }

    #[test]
    fn test_edit_item_emit_payload() {
        let action = BackendAction::EditItem {
            kind: ItemKind::Truth,
            id: "t9".into(),
            new_text: "new".into(),
        };
        let (name, payload) = action.to_emit().unwrap();
        assert_eq!(name, "editItem");
        assert_eq!(
            payload.unwrap(),
            json!({ "type": "truth", "id": "t9", "newText": "new" })
        );
    }

    #[test]
    fn test_add_item_picks_event_by_kind() {
        let dare = BackendAction::AddItem { kind: ItemKind::Dare, text: "a".into() };
        let truth = BackendAction::AddItem { kind: ItemKind::Truth, text: "b".into() };
        assert_eq!(dare.to_emit().unwrap().0, "addDare");
        assert_eq!(truth.to_emit().unwrap().0, "addTruth");
    }

    #[test]
    fn test_connection_actions_do_not_emit() {
        assert!(BackendAction::Disconnect.to_emit().is_none());
        assert!(BackendAction::Resume.to_emit().is_none());
        assert!(BackendAction::Connect { id: "a".into(), password: "b".into() }
            .to_emit()
            .is_none());
    }
}
