//! The chat controller: input in, one request out, reply rendered

use motormate_api::{ChatRequest, ChatResponse, History};

use crate::conversation::Conversation;
use crate::message::DisplayMessage;
use crate::transport::Transport;

/// Shown once on start-up
pub const GREETING: &str =
    "Hello! I'm MotorMate, your automotive expert. How can I help you find your perfect car today?";

/// Shown for every failed request, whatever the cause
pub const FAILURE_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// How a request cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Reply appended, history replaced
    Replied,
    /// Failure notice appended, history untouched
    Failed,
}

/// Mediates between user input and a single remote endpoint.
///
/// At most one request is outstanding: `begin_submit` marks the controller
/// busy and every further submission is ignored until `finish` runs.
#[derive(Debug)]
pub struct ChatController {
    conversation: Conversation,
    greeting: String,
    greeted: bool,
    busy: bool,
    scroll_requested: bool,
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatController {
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    /// Use a different start-up greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::default(),
            greeting: greeting.into(),
            greeted: false,
            busy: false,
            scroll_requested: false,
        }
    }

    /// Append the greeting. Only the first call has an effect.
    pub fn greet(&mut self) -> bool {
        if self.greeted {
            return false;
        }
        self.greeted = true;
        self.conversation
            .messages
            .push(DisplayMessage::bot(self.greeting.clone()));
        self.scroll_requested = true;
        true
    }

    /// Whether a request is outstanding (input controls disabled)
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.conversation.messages
    }

    pub fn history(&self) -> &History {
        &self.conversation.history
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns true once after anything asked for the view to follow the latest message
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Start a request cycle.
    ///
    /// Returns `None` (and changes nothing) for blank input or while busy.
    /// Otherwise the user message and placeholder are shown and the request to
    /// send is returned; the caller clears its input field.
    pub fn begin_submit(&mut self, input: &str) -> Option<ChatRequest> {
        let message = input.trim();
        if message.is_empty() || self.busy {
            return None;
        }

        self.busy = true;
        self.conversation
            .messages
            .push(DisplayMessage::user(message));
        self.conversation.messages.push(DisplayMessage::placeholder());
        self.scroll_requested = true;

        tracing::debug!(
            chars = message.chars().count(),
            history_len = self.conversation.history.len(),
            "submitting message"
        );

        Some(ChatRequest::new(message, self.conversation.history.clone()))
    }

    /// Complete the outstanding request cycle
    pub fn finish(&mut self, result: motormate_api::Result<ChatResponse>) -> Outcome {
        self.conversation.remove_placeholder();

        let outcome = match result {
            Ok(reply) => {
                self.conversation.history = reply.history;
                self.conversation
                    .messages
                    .push(DisplayMessage::bot(reply.response));
                Outcome::Replied
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    status = ?e.status_code(),
                    server_error = e.is_server_error(),
                    "chat request failed"
                );
                self.conversation
                    .messages
                    .push(DisplayMessage::error(FAILURE_MESSAGE));
                Outcome::Failed
            }
        };

        self.busy = false;
        self.scroll_requested = true;
        outcome
    }

    /// Run a full cycle against `transport`. `None` when the input was not submitted.
    pub async fn send(&mut self, transport: &dyn Transport, input: &str) -> Option<Outcome> {
        let request = self.begin_submit(input)?;
        let result = transport.send(request).await;
        Some(self.finish(result))
    }

    /// Drop display and history and greet again. Refused while busy.
    pub fn reset(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.conversation.clear();
        self.greeted = false;
        self.greet();
        true
    }
}
