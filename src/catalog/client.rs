use crate::catalog::models::{Channel, Page, PlaylistItem, RatedVideo};
use crate::catalog::VideoCatalog;
use crate::config::CatalogConfig;
use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Resource kind tag for a video entry.
pub const KIND_VIDEO: &str = "youtube#video";
/// Resource kind tag for a playlist-item entry.
pub const KIND_PLAYLIST_ITEM: &str = "youtube#playlistItem";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("API rate limit exceeded")]
    RateLimit,
    #[error("Not authenticated or token expired")]
    Unauthorized,
    #[error("Resource not found")]
    NotFound,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Channel list response wrapper
#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
struct ChannelResource {
    id: String,
    #[serde(rename = "contentDetails")]
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

/// Rated-videos list response wrapper
#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    #[serde(default)]
    kind: String,
    id: Option<String>,
}

/// Playlist-items list response wrapper
#[derive(Debug, Deserialize)]
struct PlaylistItemListResponse {
    #[serde(default)]
    items: Vec<PlaylistItemResource>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemResource {
    #[serde(default)]
    kind: String,
    snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemSnippet {
    #[serde(rename = "playlistId")]
    playlist_id: Option<String>,
    #[serde(rename = "resourceId")]
    resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl From<ChannelResource> for Channel {
    fn from(resource: ChannelResource) -> Self {
        let uploads_playlist = resource
            .content_details
            .and_then(|d| d.related_playlists)
            .and_then(|p| p.uploads)
            .filter(|uploads| !uploads.is_empty());
        Channel {
            id: resource.id,
            uploads_playlist,
        }
    }
}

impl From<VideoResource> for RatedVideo {
    fn from(resource: VideoResource) -> Self {
        RatedVideo {
            kind: resource.kind,
            id: resource.id,
        }
    }
}

impl From<PlaylistItemResource> for PlaylistItem {
    fn from(resource: PlaylistItemResource) -> Self {
        let (playlist_id, video_id) = match resource.snippet {
            Some(snippet) => (
                snippet.playlist_id,
                snippet.resource_id.and_then(|r| r.video_id),
            ),
            None => (None, None),
        };
        PlaylistItem {
            kind: resource.kind,
            video_id,
            playlist_id,
        }
    }
}

/// HTTP client for a YouTube-Data-API-v3-shaped video catalog.
///
/// Auth is a bearer token supplied via [`CatalogConfig`]; acquiring and
/// refreshing it is the host's concern. Transport errors, rate limiting and
/// auth failures surface as [`CatalogError`] and are fatal to the calling
/// import run.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        self.client
            .get(&url)
            .query(&[
                ("hl", self.config.language.as_str()),
                ("regionCode", self.config.region.as_str()),
            ])
            .bearer_auth(&self.config.access_token)
            .header("User-Agent", "tuber/0.1 +https://github.com/tuber/tuber")
    }

    async fn load<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CatalogError> {
        let response = request.send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            Ok(response.json().await?)
        } else if status == 429 {
            Err(CatalogError::RateLimit)
        } else if status == 401 {
            Err(CatalogError::Unauthorized)
        } else if status == 404 {
            Err(CatalogError::NotFound)
        } else {
            Err(CatalogError::Request(
                response.error_for_status().unwrap_err(),
            ))
        }
    }

    async fn channel_lookup(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Option<Channel>, CatalogError> {
        let request = self
            .get("channels")
            .query(&[("part", "contentDetails")])
            .query(params);

        let payload: ChannelListResponse = self.load(request).await?;
        Ok(payload.items.into_iter().next().map(Channel::from))
    }
}

#[async_trait]
impl VideoCatalog for CatalogClient {
    fn is_authenticated(&self) -> bool {
        !self.config.access_token.is_empty()
    }

    async fn my_channel(&self) -> Result<Option<Channel>, CatalogError> {
        self.channel_lookup(&[("mine", "true")]).await
    }

    async fn channel(&self, channel_id: &str) -> Result<Option<Channel>, CatalogError> {
        self.channel_lookup(&[("id", channel_id)]).await
    }

    async fn liked_videos(
        &self,
        page_token: Option<&str>,
    ) -> Result<Page<RatedVideo>, CatalogError> {
        let mut request = self.get("videos").query(&[
            ("part", "id"),
            ("myRating", "like"),
            ("fields", "items(kind,id),nextPageToken"),
        ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let payload: VideoListResponse = self.load(request).await?;
        Ok(Page::new(
            payload.items.into_iter().map(RatedVideo::from).collect(),
            payload.next_page_token,
        ))
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, CatalogError> {
        let mut request = self.get("playlistItems").query(&[
            ("part", "snippet"),
            ("playlistId", playlist_id),
            (
                "fields",
                "items(kind,id,snippet(playlistId,resourceId/videoId)),nextPageToken",
            ),
        ]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let payload: PlaylistItemListResponse = self.load(request).await?;
        Ok(Page::new(
            payload.items.into_iter().map(PlaylistItem::from).collect(),
            payload.next_page_token,
        ))
    }
}
