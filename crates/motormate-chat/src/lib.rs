//! motormate-chat: Chat controller
//!
//! Owns what the user sees (display messages) and what the server needs
//! (opaque history), and runs the single request/response cycle between them.

pub mod controller;
pub mod conversation;
pub mod message;
pub mod transport;

pub use controller::{ChatController, FAILURE_MESSAGE, GREETING, Outcome};
pub use conversation::Conversation;
pub use message::{DisplayMessage, MessageKind};
pub use transport::Transport;
