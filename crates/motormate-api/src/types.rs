//! Request/response bodies of the `/chat` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Conversation history as seen by the client: server-defined, opaque entries
pub type History = Vec<Value>;

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,
    /// History returned by the previous successful response
    #[serde(default)]
    pub history: History,
}

impl ChatRequest {
    /// Create a request carrying the current history
    pub fn new(message: impl Into<String>, history: History) -> Self {
        Self {
            message: message.into(),
            history,
        }
    }
}

/// Successful response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply
    pub response: String,
    /// Replacement history
    #[serde(default)]
    pub history: History,
    /// Present on responses from the bundled server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Error body returned by the server on non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default)]
    pub success: bool,
}

/// Speaker of a history turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Human,
    Ai,
}

/// The server's typed view of a history entry: `{"type": "human", "content": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub content: String,
}

impl Turn {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Human,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Ai,
            content: content.into(),
        }
    }

    /// Convert to an opaque history entry
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "type": match self.speaker {
                Speaker::Human => "human",
                Speaker::Ai => "ai",
            },
            "content": self.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let req = ChatRequest::new("Which SUV?", vec![json!({"type": "human", "content": "hi"})]);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"message": "Which SUV?", "history": [{"type": "human", "content": "hi"}]})
        );
    }

    #[test]
    fn test_response_keeps_unknown_history_entries() {
        let body = json!({
            "response": "Try a RAV4.",
            "history": [42, {"anything": true}, "text"],
            "success": true
        });
        let resp: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.response, "Try a RAV4.");
        assert_eq!(resp.history, vec![json!(42), json!({"anything": true}), json!("text")]);
        assert_eq!(resp.success, Some(true));
    }

    #[test]
    fn test_response_without_history_defaults_empty() {
        let resp: ChatResponse = serde_json::from_value(json!({"response": "ok"})).unwrap();
        assert!(resp.history.is_empty());
        assert_eq!(resp.success, None);
    }

    #[test]
    fn test_turn_value_matches_serde() {
        let turn = Turn::ai("Hello");
        assert_eq!(turn.to_value(), serde_json::to_value(&turn).unwrap());
        assert_eq!(turn.to_value(), json!({"type": "ai", "content": "Hello"}));
    }

    #[test]
    fn test_error_body_detail_optional() {
        let body: ErrorBody =
            serde_json::from_value(json!({"error": "Empty message", "success": false})).unwrap();
        assert_eq!(body.error, "Empty message");
        assert!(body.detail.is_none());
    }
}
