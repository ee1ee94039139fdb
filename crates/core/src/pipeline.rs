// crates/core/src/pipeline.rs

//! Resolver → catalog → generator, run once per channel URL.

use tracing::info;

use crate::ai_client::AiClient;
use crate::catalog::{Catalog, CatalogClient, YouTubeClient};
use crate::channel::resolve_channel_id;
use crate::config::{ChannelIdRule, Config};
use crate::error::PipelineError;
use crate::idea::IdeaGenerator;
use crate::openai_client::OpenAiClient;
use crate::types::IdeaText;

/// The suggestion pipeline. Holds no per-run state; one instance can serve many calls.
pub struct Pipeline<C: CatalogClient, A: AiClient> {
    catalog: Catalog<C>,
    generator: IdeaGenerator<A>,
    channel_id_rule: ChannelIdRule,
    max_results: u32,
}

impl Pipeline<YouTubeClient, OpenAiClient> {
    /// Pipeline wired to the real YouTube and OpenAI endpoints in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, YouTubeClient::new(config), OpenAiClient::new(config))
    }
}

impl<C: CatalogClient, A: AiClient> Pipeline<C, A> {
    pub fn new(config: &Config, catalog_client: C, ai_client: A) -> Self {
        Self {
            catalog: Catalog::new(catalog_client, config.missing_items),
            generator: IdeaGenerator::new(ai_client),
            channel_id_rule: config.channel_id_rule,
            max_results: config.max_results,
        }
    }

    /// Run every stage for `channel_url`; the first failure stops the run.
    pub fn run(&self, channel_url: &str) -> Result<IdeaText, PipelineError> {
        let channel_id = resolve_channel_id(channel_url, self.channel_id_rule)?;
        info!(channel_url, channel_id = %channel_id, "resolved channel");

        let playlist_id = self.catalog.uploads_playlist_id(&channel_id)?;
        info!(playlist_id = %playlist_id, "found uploads playlist");

        let titles = self.catalog.latest_titles(&playlist_id, self.max_results)?;
        info!(count = titles.len(), "fetched recent titles");

        let idea = self.generator.generate(&titles)?;
        info!(chars = idea.chars().count(), "idea generated");

        Ok(idea)
    }
}
