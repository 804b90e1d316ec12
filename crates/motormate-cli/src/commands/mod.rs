//! Slash commands, handled locally and never sent to the server

mod history;

pub use history::HistoryCommand;

use motormate_chat::ChatController;

/// Result of executing a slash command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Start a fresh conversation
    Clear,
    /// Show a message to the user (not sent to the server)
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse and execute a slash command. `None` if `input` is not a command.
pub fn execute_command(input: &str, controller: &ChatController) -> Option<CommandResult> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next().unwrap_or("").to_lowercase();
    let args = parts.next().map(str::trim).unwrap_or("");

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "clear" | "c" | "new" => CommandResult::Clear,

        "history" => HistoryCommand::execute(args, controller.history()),

        "quit" | "exit" | "q" => CommandResult::Exit,

        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?        Show this help message
  /history [full]      Show how many history entries the server returned
  /clear, /c           Start a fresh conversation
  /quit, /exit, /q     Exit motormate

Keys (full-screen mode):
  Enter                Send message
  Shift+Enter          New line (Alt+Enter or Ctrl+J if Shift isn't reported)
  PgUp/PgDn            Scroll
  Ctrl+L               Start a fresh conversation
  Ctrl+C               Quit"#
        .to_string()
}
