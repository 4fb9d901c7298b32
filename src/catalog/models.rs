use serde::{Deserialize, Serialize};

/// One page of a paginated catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque cursor for the next page; absent or empty means exhausted.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// A page with no items and no further pages.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: None,
        }
    }
}

/// A channel on the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    pub id: String,
    /// Id of the playlist holding the channel's uploads, when exposed.
    pub uploads_playlist: Option<String>,
}

/// Raw entry from the "my rating" listing. Malformed entries (wrong kind,
/// missing id) are carried through so the item adapter can skip them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatedVideo {
    pub kind: String,
    pub id: Option<String>,
}

/// Raw entry from the playlist-items listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistItem {
    pub kind: String,
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
}
