// crates/core/src/catalog.rs

//! YouTube Data API lookups: channel → uploads playlist → recent titles.

use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, MissingItems};
use crate::error::PipelineError;
use crate::types::{PlaylistId, VideoTitleList};

const CHANNELS_ENDPOINT: &str = "channels";
const PLAYLIST_ITEMS_ENDPOINT: &str = "playlistItems";

/// Abstract catalog backend returning raw JSON bodies.
///
/// The real implementation is [`YouTubeClient`]; tests plug in canned responses.
pub trait CatalogClient {
    /// `GET channels?part=contentDetails&id={channel_id}`
    fn channels(&self, channel_id: &str) -> Result<Value, PipelineError>;

    /// `GET playlistItems?part=snippet&playlistId={playlist_id}&maxResults={max_results}`
    fn playlist_items(&self, playlist_id: &str, max_results: u32) -> Result<Value, PipelineError>;
}

impl<T: CatalogClient + ?Sized> CatalogClient for &T {
    fn channels(&self, channel_id: &str) -> Result<Value, PipelineError> {
        (**self).channels(channel_id)
    }

    fn playlist_items(&self, playlist_id: &str, max_results: u32) -> Result<Value, PipelineError> {
        (**self).playlist_items(playlist_id, max_results)
    }
}

/// Blocking client for the YouTube Data API v3.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            api_key: config.youtube_api_key.clone(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    pub fn channels_request(&self, channel_id: &str) -> reqwest::Result<Request> {
        self.client
            .get(self.url(CHANNELS_ENDPOINT))
            .query(&[
                ("part", "contentDetails"),
                ("id", channel_id),
                ("key", self.api_key.as_str()),
            ])
            .build()
    }

    pub fn playlist_items_request(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> reqwest::Result<Request> {
        let max_results = max_results.to_string();
        self.client
            .get(self.url(PLAYLIST_ITEMS_ENDPOINT))
            .query(&[
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .build()
    }

    fn execute(&self, endpoint: &'static str, request: Request) -> Result<Value, PipelineError> {
        let resp = self
            .client
            .execute(request)
            .map_err(|e| PipelineError::CatalogRequest(format!("{}: {}", endpoint, e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(PipelineError::CatalogRequest(format!(
                "{}: HTTP {} - {}",
                endpoint, status, body
            )));
        }

        resp.json::<Value>().map_err(|e| PipelineError::MalformedResponse {
            endpoint,
            detail: format!("JSON として解析できません: {}", e),
        })
    }
}

impl CatalogClient for YouTubeClient {
    fn channels(&self, channel_id: &str) -> Result<Value, PipelineError> {
        let request = self
            .channels_request(channel_id)
            .map_err(|e| PipelineError::CatalogRequest(e.to_string()))?;
        self.execute(CHANNELS_ENDPOINT, request)
    }

    fn playlist_items(&self, playlist_id: &str, max_results: u32) -> Result<Value, PipelineError> {
        let request = self
            .playlist_items_request(playlist_id, max_results)
            .map_err(|e| PipelineError::CatalogRequest(e.to_string()))?;
        self.execute(PLAYLIST_ITEMS_ENDPOINT, request)
    }
}

/// `channels?part=contentDetails` response, only the fields read here.
#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    items: Option<Vec<ChannelItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(rename = "relatedPlaylists")]
    related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: Option<String>,
}

/// `playlistItems?part=snippet` response.
#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    items: Option<Vec<PlaylistItem>>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
}

fn decode<'a, T: Deserialize<'a>>(
    endpoint: &'static str,
    body: &'a Value,
) -> Result<T, PipelineError> {
    T::deserialize(body).map_err(|e| PipelineError::MalformedResponse {
        endpoint,
        detail: format!("想定外の形式です: {}", e),
    })
}

/// Read `items[0].contentDetails.relatedPlaylists.uploads` from a channels response.
pub fn uploads_playlist(body: &Value, channel_id: &str) -> Result<PlaylistId, PipelineError> {
    let response: ChannelsResponse = decode(CHANNELS_ENDPOINT, body)?;

    let first = response
        .items
        .and_then(|items| items.into_iter().next())
        .ok_or_else(|| PipelineError::ChannelNotFound {
            channel_id: channel_id.to_string(),
        })?;

    first
        .content_details
        .and_then(|details| details.related_playlists)
        .and_then(|playlists| playlists.uploads)
        .ok_or_else(|| PipelineError::MalformedResponse {
            endpoint: CHANNELS_ENDPOINT,
            detail: "items[0].contentDetails.relatedPlaylists.uploads がありません".to_string(),
        })
}

/// Read `items[*].snippet.title` from a playlistItems response, in response order.
pub fn video_titles(body: &Value, missing: MissingItems) -> Result<VideoTitleList, PipelineError> {
    let response: PlaylistItemsResponse = decode(PLAYLIST_ITEMS_ENDPOINT, body)?;

    let items = match response.items {
        Some(items) => items,
        None => {
            return match missing {
                MissingItems::Empty => Ok(VideoTitleList::default()),
                MissingItems::Reject => Err(PipelineError::MalformedResponse {
                    endpoint: PLAYLIST_ITEMS_ENDPOINT,
                    detail: "items がありません".to_string(),
                }),
            }
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            item.snippet
                .and_then(|snippet| snippet.title)
                .ok_or_else(|| PipelineError::MalformedResponse {
                    endpoint: PLAYLIST_ITEMS_ENDPOINT,
                    detail: format!("items[{}].snippet.title がありません", i),
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(VideoTitleList::from)
}

/// Catalog fetcher: a [`CatalogClient`] plus the response rules above.
pub struct Catalog<C: CatalogClient> {
    client: C,
    missing_items: MissingItems,
}

impl<C: CatalogClient> Catalog<C> {
    pub fn new(client: C, missing_items: MissingItems) -> Self {
        Self {
            client,
            missing_items,
        }
    }

    pub fn uploads_playlist_id(&self, channel_id: &str) -> Result<PlaylistId, PipelineError> {
        let body = self.client.channels(channel_id)?;
        uploads_playlist(&body, channel_id)
    }

    pub fn latest_titles(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<VideoTitleList, PipelineError> {
        let body = self.client.playlist_items(playlist_id, max_results)?;
        debug!(playlist_id, response = %body, "YouTube API response");

        let titles = video_titles(&body, self.missing_items)?;
        if titles.is_empty() {
            warn!(playlist_id, "playlist returned no titles; prompt will have an empty list");
        }
        Ok(titles)
    }
}
