// crates/core/src/config.rs

//! Startup configuration.
//!
//! Built once (normally from the process environment) and passed by reference
//! into the catalog and LLM clients.

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// playlistItems caps `maxResults` at 50.
const MAX_RESULTS_LIMIT: u32 = 50;

/// How the process was launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run directly: URL from argv (or the built-in example), `.env` loaded first.
    #[default]
    Standalone,
    /// Run under an agent host: request envelope on stdin, environment only.
    Hosted,
}

impl ExecutionMode {
    /// Read `AGENT_MODE` from the process environment.
    pub fn from_env() -> Result<Self> {
        match std::env::var("AGENT_MODE") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "standalone" | "local" => Ok(Self::Standalone),
            "hosted" | "swarmnode" => Ok(Self::Hosted),
            other => Err(anyhow!(
                "Invalid AGENT_MODE: {} (expected: standalone|hosted)",
                other
            )),
        }
    }
}

/// Which rule turns a channel URL into a channel id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelIdRule {
    /// Everything after the last `/channel/`; URLs without it are rejected.
    #[default]
    ChannelMarker,
    /// Last path segment after stripping trailing slashes; never rejects.
    LastSegment,
}

impl ChannelIdRule {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "channel" | "channel-marker" => Ok(Self::ChannelMarker),
            "last-segment" | "last_segment" => Ok(Self::LastSegment),
            other => Err(anyhow!(
                "Invalid CHANNEL_ID_RULE: {} (expected: channel|last-segment)",
                other
            )),
        }
    }
}

/// What to do when a playlistItems response has no `items` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingItems {
    /// Treat it as an empty playlist.
    #[default]
    Empty,
    /// Fail with a malformed-response error.
    Reject,
}

impl MissingItems {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "empty" | "lenient" => Ok(Self::Empty),
            "reject" | "strict" => Ok(Self::Reject),
            other => Err(anyhow!(
                "Invalid PLAYLIST_ITEMS_POLICY: {} (expected: lenient|strict)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: String,
    pub openai_api_key: String,
    pub youtube_base_url: String,
    pub openai_base_url: String,
    pub model: String,
    pub max_results: u32,
    pub channel_id_rule: ChannelIdRule,
    pub missing_items: MissingItems,
}

impl Config {
    /// Config with the given keys and every other field at its default.
    pub fn new(youtube_api_key: impl Into<String>, openai_api_key: impl Into<String>) -> Self {
        Self {
            youtube_api_key: youtube_api_key.into(),
            openai_api_key: openai_api_key.into(),
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            channel_id_rule: ChannelIdRule::default(),
            missing_items: MissingItems::default(),
        }
    }

    /// Construct from environment variables.
    ///
    /// Required: `YOUTUBE_API_KEY`, `OPENAI_API_KEY`.
    /// Optional: `YOUTUBE_API_BASE`, `OPENAI_BASE_URL`, `YOUTUBE_MAX_RESULTS`,
    /// `CHANNEL_ID_RULE`, `PLAYLIST_ITEMS_POLICY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name).and_then(|s| {
                let s = s.trim().to_string();
                if s.is_empty() {
                    None
                } else {
                    Some(s)
                }
            })
        };

        let youtube_api_key = non_empty("YOUTUBE_API_KEY").context("YOUTUBE_API_KEY not set")?;
        let openai_api_key = non_empty("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;

        let mut cfg = Self::new(youtube_api_key, openai_api_key);

        if let Some(base) = non_empty("YOUTUBE_API_BASE") {
            cfg.youtube_base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(base) = non_empty("OPENAI_BASE_URL") {
            cfg.openai_base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty("YOUTUBE_MAX_RESULTS") {
            let n: u32 = raw
                .parse()
                .with_context(|| format!("YOUTUBE_MAX_RESULTS is not a number: {}", raw))?;
            if n == 0 || n > MAX_RESULTS_LIMIT {
                return Err(anyhow!(
                    "YOUTUBE_MAX_RESULTS must be between 1 and {}, got {}",
                    MAX_RESULTS_LIMIT,
                    n
                ));
            }
            cfg.max_results = n;
        }
        if let Some(raw) = non_empty("CHANNEL_ID_RULE") {
            cfg.channel_id_rule = ChannelIdRule::parse(&raw)?;
        }
        if let Some(raw) = non_empty("PLAYLIST_ITEMS_POLICY") {
            cfg.missing_items = MissingItems::parse(&raw)?;
        }

        Ok(cfg)
    }
}
