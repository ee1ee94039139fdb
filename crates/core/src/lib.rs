// crates/core/src/lib.rs

//! Suggests a new video idea for a YouTube channel from its recent upload titles.

pub mod agent;
pub mod ai_client;
pub mod catalog;
pub mod channel;
pub mod config;
pub mod error;
pub mod idea;
pub mod openai_client;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod test_server;

pub use agent::{handle_request, suggest_video_idea, AgentRequest, AgentStore, HostedEnvelope};
pub use config::{Config, ExecutionMode};
pub use error::PipelineError;
pub use pipeline::Pipeline;
