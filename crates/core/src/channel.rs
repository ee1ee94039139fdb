// crates/core/src/channel.rs

//! Channel URL → channel id.

use crate::config::ChannelIdRule;
use crate::error::PipelineError;
use crate::types::ChannelId;

const CHANNEL_MARKER: &str = "/channel/";

/// Extract the channel id from `url` using `rule`.
pub fn resolve_channel_id(url: &str, rule: ChannelIdRule) -> Result<ChannelId, PipelineError> {
    match rule {
        ChannelIdRule::ChannelMarker => after_channel_marker(url),
        ChannelIdRule::LastSegment => Ok(last_segment(url)),
    }
}

/// Everything after the last `/channel/`, verbatim.
fn after_channel_marker(url: &str) -> Result<ChannelId, PipelineError> {
    let invalid = || PipelineError::InvalidUrlFormat {
        url: url.to_string(),
    };

    let idx = url.rfind(CHANNEL_MARKER).ok_or_else(invalid)?;
    let id = &url[idx + CHANNEL_MARKER.len()..];
    if id.is_empty() {
        return Err(invalid());
    }
    Ok(id.to_string())
}

/// Final `/`-delimited segment once trailing slashes are gone. No validation.
fn last_segment(url: &str) -> ChannelId {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, tail)) => tail.to_string(),
        None => trimmed.to_string(),
    }
}
