mod log;

use std::io::{self, Read};

use anyhow::{Context, Result};
use tracing::info;

use idea_agent_core::agent::EXAMPLE_CHANNEL_URL;
use idea_agent_core::catalog::YouTubeClient;
use idea_agent_core::openai_client::OpenAiClient;
use idea_agent_core::{
    handle_request, suggest_video_idea, Config, ExecutionMode, HostedEnvelope, Pipeline,
};

fn main() -> Result<()> {
    // AGENT_MODE comes from the real environment; .env is only consulted when standalone.
    let mode = ExecutionMode::from_env()?;
    if mode == ExecutionMode::Standalone {
        dotenvy::dotenv().ok();
    }
    log::init();

    let output = match mode {
        ExecutionMode::Standalone => {
            let channel_url = std::env::args()
                .nth(1)
                .unwrap_or_else(|| EXAMPLE_CHANNEL_URL.to_string());
            let pipeline = build_pipeline(mode)?;
            log::banner(mode, &channel_url);
            suggest_video_idea(&pipeline, &channel_url)
        }
        ExecutionMode::Hosted => hosted_reply(mode)?,
    };

    println!("{output}");
    Ok(())
}

fn build_pipeline(mode: ExecutionMode) -> Result<Pipeline<YouTubeClient, OpenAiClient>> {
    let config = Config::from_env()?;
    info!(
        mode = ?mode,
        model = %config.model,
        max_results = config.max_results,
        "configuration loaded"
    );
    Ok(Pipeline::from_config(&config))
}

/// Read one envelope from stdin. Requests without a usable `channel_url` are
/// answered before any configuration is loaded.
fn hosted_reply(mode: ExecutionMode) -> Result<String> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read request from stdin")?;

    let mut envelope = match HostedEnvelope::parse(&raw) {
        Ok(envelope) => envelope,
        Err(e) => return Ok(e.to_user_message()),
    };
    if let Err(reply) = envelope.request.channel_url_or_reply() {
        return Ok(reply);
    }

    let pipeline = build_pipeline(mode)?;
    log::banner(
        mode,
        format!(
            "payload keys: {}",
            serde_json::to_string(&envelope.request.payload.keys().collect::<Vec<_>>())?
        ),
    );
    Ok(handle_request(
        &pipeline,
        &envelope.request,
        &mut envelope.store,
    ))
}
