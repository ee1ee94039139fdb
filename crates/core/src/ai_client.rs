// crates/core/src/ai_client.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Abstract AI/LLM client for chat completions.
///
/// Implementations can use OpenAI, an OpenAI-compatible gateway, or a test double.
pub trait AiClient {
    /// Send a chat completion request.
    fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

impl<T: AiClient + ?Sized> AiClient for &T {
    fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        (**self).chat(request)
    }
}

/// A chat completion request. Sampling parameters are left to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Value>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Value>) -> Self {
        Self { messages }
    }

    /// A request holding exactly one user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(vec![json!({ "role": "user", "content": content.into() })])
    }
}

/// A chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Content of the first choice, if there is one and it carries text.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_request_has_single_message() {
        let req = ChatRequest::user("hello");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0]["role"], "user");
        assert_eq!(req.messages[0]["content"], "hello");
    }

    #[test]
    fn test_first_content() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "first" } },
                { "index": 1, "message": { "role": "assistant", "content": "second" } }
            ]
        }))
        .unwrap();
        assert_eq!(resp.first_content(), Some("first"));
    }

    #[test]
    fn test_missing_choices_deserializes_empty() {
        let resp: ChatResponse = serde_json::from_value(json!({ "id": "chatcmpl-2" })).unwrap();
        assert!(resp.choices.is_empty());
        assert_eq!(resp.first_content(), None);
    }
}
