//! Transport abstraction for reaching the chat endpoint

use async_trait::async_trait;
use motormate_api::{ChatClient, ChatRequest, ChatResponse, Result};

/// Something that can deliver one chat request and return the reply
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a single request; no retries
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse>;
}

#[async_trait]
impl Transport for ChatClient {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        ChatClient::send(self, &request).await
    }
}
