use crate::protocol::ChatMessage;

/// The shared chat log: appended on live pushes, replaced wholesale on refresh.
#[derive(Default, Clone, Debug)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
    /// Messages received while the chat panel was scrolled away or hidden
    pub unread_count: usize,
    /// Set whenever messages change so the view can scroll to the bottom
    pub scroll_to_bottom: bool,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: ChatMessage, is_visible: bool) {
        self.messages.push(msg);
        if !is_visible {
            self.unread_count += 1;
        }
        self.scroll_to_bottom = true;
    }

    pub fn replace_all(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.scroll_to_bottom = true;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.unread_count = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_unread(&mut self) {
        self.unread_count = 0;
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
