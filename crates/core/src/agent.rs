// crates/core/src/agent.rs

//! The two ways callers reach the pipeline.
//!
//! - [`suggest_video_idea`]: direct call with a channel URL.
//! - [`handle_request`]: agent-host call with a request payload and a store.
//!
//! Both return a plain string and never propagate an error; failures are
//! rendered with [`ERROR_PREFIX`](crate::error::ERROR_PREFIX).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::ai_client::AiClient;
use crate::catalog::CatalogClient;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;

/// Payload key holding the channel URL.
pub const CHANNEL_URL_PARAM: &str = "channel_url";

/// Returned as-is (no error prefix) when the payload has no channel URL.
pub const MISSING_CHANNEL_URL: &str = "channel_url パラメータが指定されていません。";

/// Channel used when the binary runs standalone without an argument.
pub const EXAMPLE_CHANNEL_URL: &str = "https://www.youtube.com/channel/UCBR8-60-B28hp2BmDPdntcQ";

/// Request handed over by the agent host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentRequest {
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl AgentRequest {
    pub fn with_payload(payload: Map<String, Value>) -> Self {
        Self { payload }
    }

    fn channel_url(&self) -> Result<&str, PipelineError> {
        match self.payload.get(CHANNEL_URL_PARAM) {
            None | Some(Value::Null) => Err(PipelineError::MissingParameter(CHANNEL_URL_PARAM)),
            Some(Value::String(url)) => Ok(url.as_str()),
            Some(other) => Err(PipelineError::InvalidParameter {
                name: CHANNEL_URL_PARAM,
                reason: format!("文字列ではありません: {}", other),
            }),
        }
    }

    /// The channel URL, or the final reply when the request can be answered
    /// without touching any service (missing or non-string `channel_url`).
    pub fn channel_url_or_reply(&self) -> Result<&str, String> {
        match self.channel_url() {
            Ok(url) => Ok(url),
            Err(PipelineError::MissingParameter(name)) => {
                warn!(param = name, "request without required parameter");
                Err(MISSING_CHANNEL_URL.to_string())
            }
            Err(e) => Err(render(Err(e))),
        }
    }
}

/// Key/value store the host passes alongside every request.
///
/// This agent keeps no state between calls and never writes to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentStore {
    entries: HashMap<String, Value>,
}

impl AgentStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the host writes to stdin in hosted mode: `{"payload": {...}, "store": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostedEnvelope {
    #[serde(flatten)]
    pub request: AgentRequest,
    #[serde(default)]
    pub store: AgentStore,
}

impl HostedEnvelope {
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(raw).map_err(|e| PipelineError::InvalidParameter {
            name: "request",
            reason: format!("JSON として解析できません: {}", e),
        })
    }
}

/// Direct-call adapter.
pub fn suggest_video_idea<C: CatalogClient, A: AiClient>(
    pipeline: &Pipeline<C, A>,
    channel_url: &str,
) -> String {
    render(pipeline.run(channel_url))
}

/// Agent-host adapter. `store` is part of the host contract and left untouched.
pub fn handle_request<C: CatalogClient, A: AiClient>(
    pipeline: &Pipeline<C, A>,
    request: &AgentRequest,
    store: &mut AgentStore,
) -> String {
    if !store.is_empty() {
        debug!(entries = store.len(), "host store provided");
    }

    match request.channel_url_or_reply() {
        Ok(channel_url) => render(pipeline.run(channel_url)),
        Err(reply) => reply,
    }
}

fn render(result: Result<String, PipelineError>) -> String {
    match result {
        Ok(idea) => idea,
        Err(e) => {
            error!(error = %e, "suggestion failed");
            e.to_user_message()
        }
    }
}
