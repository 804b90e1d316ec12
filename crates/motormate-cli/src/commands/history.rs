//! /history command

use super::CommandResult;
use motormate_api::History;

/// Show the server-supplied history
pub struct HistoryCommand;

impl HistoryCommand {
    /// `/history` prints a count; `/history full` dumps the entries as JSON
    pub fn execute(args: &str, history: &History) -> CommandResult {
        if history.is_empty() {
            return CommandResult::Message("No history yet.".to_string());
        }

        let summary = format!(
            "History: {} entr{} (sent back to the server with every message)",
            history.len(),
            if history.len() == 1 { "y" } else { "ies" }
        );

        if args.eq_ignore_ascii_case("full") {
            let dump = serde_json::to_string_pretty(history)
                .unwrap_or_else(|e| format!("<unprintable history: {}>", e));
            CommandResult::Message(format!("{}\n{}", summary, dump))
        } else {
            CommandResult::Message(summary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_history() {
        assert_eq!(
            HistoryCommand::execute("", &vec![]),
            CommandResult::Message("No history yet.".into())
        );
    }

    #[test]
    fn test_count_and_full_dump() {
        let history = vec![
            json!({"type": "human", "content": "hi"}),
            json!({"type": "ai", "content": "hello"}),
        ];

        match HistoryCommand::execute("", &history) {
            CommandResult::Message(text) => assert!(text.starts_with("History: 2 entries")),
            other => panic!("unexpected {:?}", other),
        }

        match HistoryCommand::execute("full", &history) {
            CommandResult::Message(text) => assert!(text.contains("\"content\": \"hello\"")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
