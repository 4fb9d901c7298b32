use serde::{Deserialize, Serialize};

/// An importer-ready media entry, handed to the host sink in per-view batches.
///
/// Identity is the remote video id. Uniqueness is expected within a single
/// view but not enforced across views; the same video reachable through two
/// configured views is delivered twice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportedItem {
    /// Remote catalog video id.
    pub video_id: String,
    /// Addon-style playback path for the host library.
    pub path: String,
    /// Playlist the item was listed under, if it came from a playlist view.
    pub playlist_id: Option<String>,
    /// Whether the item belongs to the authenticated user's own content.
    /// Affects how the host attributes ownership metadata.
    pub mine: bool,
}

impl ImportedItem {
    pub fn new(video_id: impl Into<String>, playlist_id: Option<String>, mine: bool) -> Self {
        let video_id = video_id.into();
        let path = format!("tuber://video/{}", video_id);
        Self {
            video_id,
            path,
            playlist_id,
            mine,
        }
    }
}
