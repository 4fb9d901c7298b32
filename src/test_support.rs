// Test support utilities for both unit and integration tests

use crate::catalog::{CatalogError, Channel, Page, PlaylistItem, RatedVideo, VideoCatalog};
use crate::identity::FavoritePlaylistStore;
use crate::import::{CancellationGate, ImportSink, ProgressSink};
use crate::models::ImportedItem;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted catalog for testing.
///
/// Pages are pre-recorded per endpoint and paged through with synthetic
/// `page-N` tokens. Useful for driving the import pipeline without a live
/// service.
pub struct MockCatalog {
    authenticated: bool,
    own_channel: Option<Channel>,
    channels: HashMap<String, Channel>,
    liked: Vec<Vec<RatedVideo>>,
    playlists: HashMap<String, Vec<Vec<PlaylistItem>>>,
    playlist_calls: AtomicUsize,
}

impl Default for MockCatalog {
    fn default() -> Self {
        MockCatalog {
            authenticated: true,
            own_channel: None,
            channels: HashMap::new(),
            liked: Vec::new(),
            playlists: HashMap::new(),
            playlist_calls: AtomicUsize::new(0),
        }
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Give the mock an own channel, optionally with an uploads playlist.
    pub fn with_own_channel(mut self, channel_id: &str, uploads_playlist: Option<&str>) -> Self {
        self.own_channel = Some(Channel {
            id: channel_id.to_string(),
            uploads_playlist: None,
        });
        self.channels.insert(
            channel_id.to_string(),
            Channel {
                id: channel_id.to_string(),
                uploads_playlist: uploads_playlist.map(str::to_string),
            },
        );
        self
    }

    /// Script the liked-videos listing, one inner `Vec` per page.
    pub fn with_liked_pages(mut self, pages: Vec<Vec<RatedVideo>>) -> Self {
        self.liked = pages;
        self
    }

    /// Script a playlist's item listing, one inner `Vec` per page.
    pub fn with_playlist_pages(mut self, playlist_id: &str, pages: Vec<Vec<PlaylistItem>>) -> Self {
        self.playlists.insert(playlist_id.to_string(), pages);
        self
    }

    /// Number of playlist-items page fetches made so far.
    pub fn playlist_calls(&self) -> usize {
        self.playlist_calls.load(Ordering::SeqCst)
    }
}

fn page_index(token: Option<&str>) -> usize {
    token
        .and_then(|t| t.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn scripted_page<T: Clone>(pages: &[Vec<T>], token: Option<&str>) -> Page<T> {
    let index = page_index(token);
    let items = pages.get(index).cloned().unwrap_or_default();
    let next = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
    Page::new(items, next)
}

#[async_trait]
impl VideoCatalog for MockCatalog {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn my_channel(&self) -> Result<Option<Channel>, CatalogError> {
        Ok(self.own_channel.clone())
    }

    async fn channel(&self, channel_id: &str) -> Result<Option<Channel>, CatalogError> {
        Ok(self.channels.get(channel_id).cloned())
    }

    async fn liked_videos(
        &self,
        page_token: Option<&str>,
    ) -> Result<Page<RatedVideo>, CatalogError> {
        Ok(scripted_page(&self.liked, page_token))
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, CatalogError> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);
        let pages = self.playlists.get(playlist_id).cloned().unwrap_or_default();
        Ok(scripted_page(&pages, page_token))
    }
}

/// Gate that cancels at the Nth poll (1-based) and every poll after.
pub struct ScriptedGate {
    polls: AtomicUsize,
    cancel_at: Option<usize>,
}

impl ScriptedGate {
    pub fn never() -> Self {
        Self {
            polls: AtomicUsize::new(0),
            cancel_at: None,
        }
    }

    pub fn cancel_at_poll(n: usize) -> Self {
        Self {
            polls: AtomicUsize::new(0),
            cancel_at: Some(n),
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl CancellationGate for ScriptedGate {
    fn should_cancel(&self, _current: usize, _total: usize) -> bool {
        let count = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.cancel_at {
            Some(n) => count >= n,
            None => false,
        }
    }
}

/// Fixed favorite-playlists listing.
pub struct StaticFavorites {
    ids: Vec<String>,
}

impl StaticFavorites {
    pub fn new(ids: Vec<&str>) -> Self {
        Self {
            ids: ids.into_iter().map(str::to_string).collect(),
        }
    }
}

impl FavoritePlaylistStore for StaticFavorites {
    fn list(&self, offset: usize, limit: usize) -> Vec<String> {
        self.ids.iter().skip(offset).take(limit).cloned().collect()
    }
}

/// Sink that records delivered batches for assertions.
pub struct RecordingSink {
    batches: Mutex<Vec<(String, Vec<ImportedItem>)>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<(String, Vec<ImportedItem>)> {
        self.batches.lock().unwrap().clone()
    }
}

impl ImportSink for RecordingSink {
    fn deliver(&self, items: Vec<ImportedItem>, media_type: &str) {
        self.batches
            .lock()
            .unwrap()
            .push((media_type.to_string(), items));
    }
}

/// Progress sink that records messages for assertions.
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
}

impl Default for RecordingProgress {
    fn default() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn report_progress(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
