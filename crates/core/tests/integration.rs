use std::cell::Cell;

use anyhow::Result;
use serde_json::{json, Map, Value};

use idea_agent_core::agent::MISSING_CHANNEL_URL;
use idea_agent_core::ai_client::{AiClient, ChatRequest, ChatResponse};
use idea_agent_core::catalog::CatalogClient;
use idea_agent_core::error::ERROR_PREFIX;
use idea_agent_core::{
    handle_request, suggest_video_idea, AgentRequest, AgentStore, Config, Pipeline, PipelineError,
};

const IDEA: &str = "1. 朝5分ルーティン\n2. 忙しい視聴者でも真似しやすい短尺企画です。";

/// Catalog double: canned responses, optional failure, call counter.
struct StubCatalog {
    fail: bool,
    calls: Cell<usize>,
}

impl StubCatalog {
    fn ok() -> Self {
        Self {
            fail: false,
            calls: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            calls: Cell::new(0),
        }
    }
}

impl CatalogClient for StubCatalog {
    fn channels(&self, _channel_id: &str) -> Result<Value, PipelineError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(PipelineError::CatalogRequest(
                "channels: HTTP 403 Forbidden - quotaExceeded".to_string(),
            ));
        }
        Ok(json!({
            "items": [ { "contentDetails": { "relatedPlaylists": { "uploads": "UUabc" } } } ]
        }))
    }

    fn playlist_items(&self, _playlist_id: &str, _max_results: u32) -> Result<Value, PipelineError> {
        self.calls.set(self.calls.get() + 1);
        Ok(json!({
            "items": [
                { "snippet": { "title": "朝のルーティン" } },
                { "snippet": { "title": "一週間の作り置き" } },
                { "snippet": { "title": "100均で揃える収納" } }
            ]
        }))
    }
}

/// LLM double returning [`IDEA`].
struct StubLlm {
    calls: Cell<usize>,
}

impl StubLlm {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl AiClient for StubLlm {
    fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.calls.set(self.calls.get() + 1);
        assert_eq!(request.messages.len(), 1);
        Ok(serde_json::from_value(json!({
            "choices": [ { "index": 0, "message": { "role": "assistant", "content": IDEA } } ]
        }))?)
    }
}

fn config() -> Config {
    Config::new("test-youtube-key", "test-openai-key")
}

fn request(payload: Value) -> AgentRequest {
    let map: Map<String, Value> = serde_json::from_value(payload).unwrap();
    AgentRequest::with_payload(map)
}

#[test]
fn test_hosted_call_returns_llm_text_verbatim() {
    let catalog = StubCatalog::ok();
    let llm = StubLlm::new();
    let pipeline = Pipeline::new(&config(), &catalog, &llm);

    let out = handle_request(
        &pipeline,
        &request(json!({ "channel_url": "https://www.youtube.com/channel/UCabc" })),
        &mut AgentStore::default(),
    );

    assert_eq!(out, IDEA);
    assert_eq!(catalog.calls.get(), 2);
    assert_eq!(llm.calls.get(), 1);
}

#[test]
fn test_hosted_call_without_channel_url_makes_no_calls() {
    let catalog = StubCatalog::ok();
    let llm = StubLlm::new();
    let pipeline = Pipeline::new(&config(), &catalog, &llm);

    let out = handle_request(&pipeline, &request(json!({})), &mut AgentStore::default());

    assert_eq!(out, MISSING_CHANNEL_URL);
    assert!(!out.starts_with(ERROR_PREFIX));
    assert_eq!(catalog.calls.get(), 0);
    assert_eq!(llm.calls.get(), 0);
}

#[test]
fn test_hosted_call_with_failing_catalog() {
    let catalog = StubCatalog::failing();
    let llm = StubLlm::new();
    let pipeline = Pipeline::new(&config(), &catalog, &llm);

    let out = handle_request(
        &pipeline,
        &request(json!({ "channel_url": "https://www.youtube.com/channel/UCabc" })),
        &mut AgentStore::default(),
    );

    assert!(out.starts_with(ERROR_PREFIX));
    assert!(out.contains("quotaExceeded"));
    assert_eq!(llm.calls.get(), 0);
}

#[test]
fn test_hosted_call_with_non_string_channel_url() {
    let catalog = StubCatalog::ok();
    let llm = StubLlm::new();
    let pipeline = Pipeline::new(&config(), &catalog, &llm);

    let out = handle_request(
        &pipeline,
        &request(json!({ "channel_url": ["https://www.youtube.com/channel/UCabc"] })),
        &mut AgentStore::default(),
    );

    assert!(out.starts_with(ERROR_PREFIX));
    assert_eq!(catalog.calls.get(), 0);
}

#[test]
fn test_direct_call_success_and_bad_url() {
    let catalog = StubCatalog::ok();
    let llm = StubLlm::new();
    let pipeline = Pipeline::new(&config(), &catalog, &llm);

    assert_eq!(
        suggest_video_idea(&pipeline, "https://www.youtube.com/channel/UCabc"),
        IDEA
    );

    let out = suggest_video_idea(&pipeline, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert!(out.starts_with(ERROR_PREFIX));
    assert!(out.contains("/channel/"));
    assert_eq!(catalog.calls.get(), 2);
}
