// crates/core/src/openai_client.rs

//! OpenAI Chat Completions client.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Request};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::ai_client::{AiClient, ChatRequest, ChatResponse};
use crate::config::Config;

/// OpenAI client using `POST {base_url}/chat/completions`.
///
/// No retries: one request per call, failures go straight back to the caller.
pub struct OpenAiClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        let url = format!(
            "{}/chat/completions",
            config.openai_base_url.trim_end_matches('/')
        );

        Self {
            client: Client::new(),
            url,
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn build_request(&self, request: &ChatRequest) -> reqwest::Result<Request> {
        let body = CompletionsRequest {
            model: &self.model,
            messages: &request.messages,
        };

        self.client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .build()
    }
}

/// Request body: model + messages, nothing else.
#[derive(Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [Value],
}

impl AiClient for OpenAiClient {
    fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let http_request = self
            .build_request(&request)
            .context("failed to build chat completions request")?;

        debug!(url = %self.url, model = %self.model, "sending chat completion");

        let resp = self
            .client
            .execute(http_request)
            .context("failed to send chat completions request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            anyhow::bail!(
                "chat completions failed: HTTP {} - {}",
                status,
                provider_error_message(&body).unwrap_or(body)
            );
        }

        resp.json::<ChatResponse>()
            .context("failed to parse chat completions response")
    }
}

/// `error.message` from an OpenAI error body, when the body has one.
fn provider_error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
