// crates/core/src/error.rs

//! Failure kinds of a single suggestion run.
//!
//! Display strings are shown to the end user (after the adapter prefix),
//! so they are written in Japanese like the rest of the output.

use thiserror::Error;

/// Prefix put in front of every error string an adapter returns.
pub const ERROR_PREFIX: &str = "エラーが発生しました: ";

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The URL does not contain the `/channel/` marker (or nothing follows it).
    #[error("URL形式が /channel/ を含んでいません: {url}")]
    InvalidUrlFormat { url: String },

    /// The channels endpoint returned zero items for this id.
    #[error("チャンネルが見つかりません: {channel_id}")]
    ChannelNotFound { channel_id: String },

    /// A response was missing a field the pipeline reads.
    #[error("{endpoint} のレスポンス形式が不正です: {detail}")]
    MalformedResponse {
        endpoint: &'static str,
        detail: String,
    },

    /// Transport failure or non-success status from the catalog API.
    #[error("YouTube API へのリクエストに失敗しました: {0}")]
    CatalogRequest(String),

    /// Provider call failed, or returned no usable completion.
    #[error("LLM へのリクエストに失敗しました: {0}")]
    LlmRequest(String),

    /// A required request parameter was not supplied.
    #[error("パラメータ {0} が指定されていません")]
    MissingParameter(&'static str),

    /// A request parameter was supplied with the wrong shape.
    #[error("パラメータ {name} が不正です: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl PipelineError {
    /// The string an adapter hands back to its caller.
    pub fn to_user_message(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}
