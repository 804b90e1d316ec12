//! System prompt and conversation assembly

use crate::error::ApiError;
use crate::model::ModelMessage;
use motormate_api::Speaker;
use serde::Deserialize;
use serde_json::Value;

/// Persona and ground rules sent ahead of every conversation
pub const SYSTEM_PROMPT: &str = "\
You are MotorMate, an expert automotive assistant with comprehensive knowledge about cars. Your capabilities include:

1. Car Recommendations: You can suggest vehicles based on user preferences, budget, lifestyle, and needs.
2. Car Comparisons: You can compare different car models across various parameters like performance, features, price, reliability, and value.
3. Technical Knowledge: You can explain car specifications, features, and technical details in an easy-to-understand way.
4. Market Insight: You have knowledge about current car market trends, pricing, and value propositions.
5. Practical Advice: You can provide guidance on car maintenance, ownership costs, and practical considerations.
6. Keep your responses short; only give long answers when the customer asks for them.

Guidelines for interaction:
- Ask clarifying questions when needed to provide better recommendations
- Provide balanced, objective comparisons
- Include both pros and cons in your recommendations
- Consider factors like budget, safety, reliability, and practical needs
- Use your automotive expertise to explain technical concepts in simple terms
- Keep responses concise but informative

Remember: Your goal is to help users make informed decisions about their car choices while maintaining a helpful and professional demeanor.";

/// Turn client history plus the new message into the model conversation.
///
/// Entries typed `human` or `ai` become user/assistant turns; other types are
/// skipped. An entry without a `type`, or a turn without string `content`, is
/// an internal error.
pub fn build_conversation(history: &[Value], message: &str) -> Result<Vec<ModelMessage>, ApiError> {
    let mut conversation = Vec::with_capacity(history.len() + 2);
    conversation.push(ModelMessage::system(SYSTEM_PROMPT));

    for (i, entry) in history.iter().enumerate() {
        let kind = entry
            .get("type")
            .ok_or_else(|| ApiError::Internal(format!("history entry {} has no 'type'", i)))?;

        let make: fn(String) -> ModelMessage = match Speaker::deserialize(kind) {
            Ok(Speaker::Human) => ModelMessage::user,
            Ok(Speaker::Ai) => ModelMessage::assistant,
            Err(_) => continue,
        };

        let content = entry
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ApiError::Internal(format!("history entry {} has no string 'content'", i))
            })?;
        conversation.push(make(content.to_string()));
    }

    conversation.push(ModelMessage::user(message));
    Ok(conversation)
}
