// # User Identity
//
// Read-only view of the signed-in user consumed during an import run.
// Sign-in, token refresh and persistent storage of these fields belong to
// the host; the import core only reads them.

use uuid::Uuid;

/// The signed-in user's identity record.
///
/// `watchlater_playlist` and `history_playlist` are the user's special
/// playlist ids. Content listed from either is attributed as the user's own
/// even when the configured view doesn't say so explicitly.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub uuid: Uuid,
    pub watchlater_playlist: String,
    pub history_playlist: String,
}

impl UserIdentity {
    pub fn new(
        watchlater_playlist: impl Into<String>,
        history_playlist: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            watchlater_playlist: watchlater_playlist.into(),
            history_playlist: history_playlist.into(),
        }
    }
}

/// Read-only lookup of the user's favorite playlist ids.
///
/// Backed by host-local storage; the import core only pages through it.
/// `list` returns up to `limit` playlist ids starting at `offset`, in a
/// stable order.
pub trait FavoritePlaylistStore: Send + Sync {
    fn list(&self, offset: usize, limit: usize) -> Vec<String>;
}

/// Favorites store for hosts that don't track favorite playlists.
pub struct NoFavorites;

impl FavoritePlaylistStore for NoFavorites {
    fn list(&self, _offset: usize, _limit: usize) -> Vec<String> {
        Vec::new()
    }
}
