//! HTTP client for `POST /chat`

use crate::{
    error::{Error, Result},
    types::{ChatRequest, ChatResponse, ErrorBody},
};

/// Where the bundled server listens by default
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Chat endpoint client
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::InvalidEndpoint(base_url));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    /// Client for [`DEFAULT_ENDPOINT`]
    pub fn local() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the chat route
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Send one message with the current history
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        tracing::debug!(
            url = %url,
            history_len = request.history.len(),
            "posting chat message"
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body.error,
                Err(_) if text.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("no response body")
                    .to_string(),
                Err(_) => text,
            };
            return Err(Error::status(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;
        tracing::debug!(history_len = parsed.history.len(), "chat reply received");
        Ok(parsed)
    }

    /// Convenience wrapper around [`ChatClient::send`]
    pub async fn chat(
        &self,
        message: impl Into<String>,
        history: crate::types::History,
    ) -> Result<ChatResponse> {
        self.send(&ChatRequest::new(message, history)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_new_rejects_non_http() {
        assert!(matches!(
            ChatClient::new("localhost:5000"),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ChatClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.chat_url(), "http://127.0.0.1:5000/chat");
    }

    #[test]
    fn test_local_matches_default_endpoint() {
        let client = ChatClient::local();
        assert_eq!(client.base_url(), DEFAULT_ENDPOINT);
        assert_eq!(
            client.chat_url(),
            ChatClient::new(DEFAULT_ENDPOINT).unwrap().chat_url()
        );
    }

    #[tokio::test]
    async fn test_send_echoes_history() {
        let router = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                let mut history = body["history"].as_array().cloned().unwrap_or_default();
                history.push(json!({"type": "human", "content": body["message"]}));
                history.push(json!({"type": "ai", "content": "Consider a Civic."}));
                Json(json!({
                    "response": "Consider a Civic.",
                    "history": history,
                    "success": true
                }))
            }),
        );
        let client = ChatClient::new(spawn_server(router).await).unwrap();

        let resp = client
            .chat("Cheap commuter?", vec![json!({"opaque": 1})])
            .await
            .unwrap();

        assert_eq!(resp.response, "Consider a Civic.");
        assert_eq!(resp.history.len(), 3);
        assert_eq!(resp.history[0], json!({"opaque": 1}));
        assert_eq!(resp.history[1]["content"], "Cheap commuter?");
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let router = Router::new().route(
            "/chat",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Error generating response", "success": false})),
                )
            }),
        );
        let client = ChatClient::new(spawn_server(router).await).unwrap();

        let err = client.chat("hello", vec![]).await.unwrap_err();
        match err {
            Error::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Error generating response");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_kept_verbatim() {
        let router = Router::new().route(
            "/chat",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let client = ChatClient::new(spawn_server(router).await).unwrap();

        let err = client.chat("hello", vec![]).await.unwrap_err();
        assert_eq!(err.status_code(), Some(502));
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_error() {
        let router = Router::new().route("/chat", post(|| async { "not json" }));
        let client = ChatClient::new(spawn_server(router).await).unwrap();

        let err = client.chat("hello", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "got: {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(format!("http://{}", addr)).unwrap();
        let err = client.chat("hello", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)), "got: {:?}", err);
        assert_eq!(err.status_code(), None);
    }
}
