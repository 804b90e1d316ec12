//! Conversation state: display messages and server history.

use motormate_api::History;

use crate::message::DisplayMessage;

/// Conversation state: what is on screen and what goes to the server.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    /// Display messages, oldest first
    pub messages: Vec<DisplayMessage>,
    /// Opaque history from the last successful response
    pub history: History,
}

impl Conversation {
    /// Remove the thinking placeholder, if present
    pub fn remove_placeholder(&mut self) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_placeholder());
        self.messages.len() != before
    }

    /// Whether a placeholder is currently shown
    pub fn has_placeholder(&self) -> bool {
        self.messages.iter().any(DisplayMessage::is_placeholder)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.history.clear();
    }
}
