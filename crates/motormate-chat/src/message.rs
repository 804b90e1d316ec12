//! Display messages

use std::fmt;

/// What a display message represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Text the user submitted
    User,
    /// Reply from the server (or the greeting)
    Bot,
    /// Generic failure notice
    Error,
    /// Transient "thinking" entry while a request is outstanding
    Placeholder,
}

/// A single display-only entry in the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl DisplayMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Bot,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            kind: MessageKind::Placeholder,
            text: "Thinking...".to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == MessageKind::Placeholder
    }

    /// Speaker label shown before the text, if any
    pub fn label(&self) -> Option<&'static str> {
        match self.kind {
            MessageKind::User => Some("You"),
            MessageKind::Bot | MessageKind::Placeholder => Some("Bot"),
            MessageKind::Error => None,
        }
    }
}

impl fmt::Display for DisplayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}: {}", label, self.text),
            None => f.write_str(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(DisplayMessage::user("hi").to_string(), "You: hi");
        assert_eq!(DisplayMessage::bot("hello").to_string(), "Bot: hello");
        assert_eq!(DisplayMessage::placeholder().to_string(), "Bot: Thinking...");
        assert_eq!(DisplayMessage::error("oops").to_string(), "oops");
    }
}
