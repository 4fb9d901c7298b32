// # View Strategies
//
// Mode-specific algorithms that turn one resolved view into a sequence of
// importable items. All four are built on the paged fetcher; favorite
// playlists adds an outer pagination layer over playlist ids.

use crate::catalog::{
    CatalogError, PlaylistItem, RatedVideo, VideoCatalog, KIND_PLAYLIST_ITEM, KIND_VIDEO,
};
use crate::identity::{FavoritePlaylistStore, UserIdentity};
use crate::import::fetcher::{fetch_paged, Fetched};
use crate::import::types::CancellationGate;
use crate::models::ImportedItem;
use futures::FutureExt;
use tracing::warn;

/// Executes view strategies against one catalog/identity pair.
///
/// One instance serves one view invocation; the orchestrator builds a fresh
/// one per (media type, view) pair. Empty results are a valid outcome
/// (content absence); `Fetched::Aborted` only ever means the gate fired.
pub struct ViewImporter<'a> {
    catalog: &'a dyn VideoCatalog,
    identity: &'a UserIdentity,
    favorites: &'a dyn FavoritePlaylistStore,
    gate: &'a dyn CancellationGate,
    budget: usize,
}

impl<'a> ViewImporter<'a> {
    pub fn new(
        catalog: &'a dyn VideoCatalog,
        identity: &'a UserIdentity,
        favorites: &'a dyn FavoritePlaylistStore,
        gate: &'a dyn CancellationGate,
        budget: usize,
    ) -> Self {
        Self {
            catalog,
            identity,
            favorites,
            gate,
            budget,
        }
    }

    /// "My Channel": the uploads playlist of the authenticated user's own
    /// channel. A missing channel or uploads playlist is content absence,
    /// not a failure.
    pub async fn my_channel_uploads(&self) -> Result<Fetched<ImportedItem>, CatalogError> {
        let Some(channel) = self.catalog.my_channel().await? else {
            warn!("failed to determine channel id of \"My Channel\"");
            return Ok(Fetched::Complete(Vec::new()));
        };

        let uploads_playlist = self
            .catalog
            .channel(&channel.id)
            .await?
            .and_then(|c| c.uploads_playlist);

        let Some(uploads_playlist) = uploads_playlist else {
            warn!(
                "failed to determine uploads playlist of \"My Channel\" ({})",
                channel.id
            );
            return Ok(Fetched::Complete(Vec::new()));
        };

        self.playlist(&uploads_playlist, true).await
    }

    /// "Liked Videos": the user's like-rated videos.
    pub async fn liked_videos(&self) -> Result<Fetched<ImportedItem>, CatalogError> {
        let catalog = self.catalog;
        fetch_paged(
            self.budget,
            self.gate,
            move |token| async move { catalog.liked_videos(token.as_deref()).await }.boxed(),
            adapt_rated_video,
        )
        .await
    }

    /// A single playlist. An empty id yields an empty result immediately.
    ///
    /// The user's watch-later and history playlists count as the user's own
    /// content even when `mine` wasn't passed, so the adapter attributes
    /// ownership correctly.
    pub async fn playlist(
        &self,
        playlist_id: &str,
        mine: bool,
    ) -> Result<Fetched<ImportedItem>, CatalogError> {
        if playlist_id.is_empty() {
            return Ok(Fetched::Complete(Vec::new()));
        }

        let mine = mine
            || playlist_id == self.identity.watchlater_playlist
            || playlist_id == self.identity.history_playlist;

        let catalog = self.catalog;
        let playlist_id = playlist_id.to_owned();
        fetch_paged(
            self.budget,
            self.gate,
            move |token| {
                let playlist_id = playlist_id.clone();
                async move {
                    catalog
                        .playlist_items(&playlist_id, token.as_deref())
                        .await
                }
                .boxed()
            },
            move |raw| adapt_playlist_item(raw, mine),
        )
        .await
    }

    /// "Favorite Playlists": two-level pagination. The outer loop pages
    /// through the user's favorite playlist ids (page size = budget), the
    /// inner loop is the playlist strategy with the same budget. Items
    /// accumulate across playlists until the budget is reached or the
    /// favorites are exhausted.
    pub async fn favorite_playlists(&self) -> Result<Fetched<ImportedItem>, CatalogError> {
        let budget = self.budget;
        let mut items: Vec<ImportedItem> = Vec::new();
        let mut page = 1usize;

        while items.len() < budget {
            if self.gate.should_cancel(items.len(), budget) {
                return Ok(Fetched::Aborted);
            }

            let playlist_ids = self.favorites.list((page - 1) * budget, budget);
            for playlist_id in &playlist_ids {
                if self.gate.should_cancel(items.len(), budget) {
                    return Ok(Fetched::Aborted);
                }

                match self.playlist(playlist_id, false).await? {
                    Fetched::Complete(batch) => items.extend(batch),
                    Fetched::Aborted => return Ok(Fetched::Aborted),
                }
            }

            if items.len() >= budget {
                break;
            }

            // Probe the next offset to see whether more playlists exist.
            if self.favorites.list(page * budget, 1).is_empty() {
                break;
            }
            page += 1;
        }

        items.truncate(budget);
        Ok(Fetched::Complete(items))
    }
}

/// Adapt a raw rated-video entry. Wrong kind or missing id means the entry
/// is skipped.
fn adapt_rated_video(raw: RatedVideo) -> Option<ImportedItem> {
    if raw.kind != KIND_VIDEO {
        return None;
    }
    let video_id = raw.id.filter(|id| !id.is_empty())?;
    Some(ImportedItem::new(video_id, None, false))
}

/// Adapt a raw playlist-item entry, attributing ownership via `mine`.
fn adapt_playlist_item(raw: PlaylistItem, mine: bool) -> Option<ImportedItem> {
    if raw.kind != KIND_PLAYLIST_ITEM {
        return None;
    }
    let video_id = raw.video_id.filter(|id| !id.is_empty())?;
    Some(ImportedItem::new(video_id, raw.playlist_id, mine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::NoFavorites;
    use crate::test_support::{MockCatalog, ScriptedGate, StaticFavorites};

    fn identity() -> UserIdentity {
        UserIdentity::new("WL-1", "HL-1")
    }

    fn rated(id: &str) -> RatedVideo {
        RatedVideo {
            kind: KIND_VIDEO.to_string(),
            id: Some(id.to_string()),
        }
    }

    fn playlist_entry(video_id: &str, playlist_id: &str) -> PlaylistItem {
        PlaylistItem {
            kind: KIND_PLAYLIST_ITEM.to_string(),
            video_id: Some(video_id.to_string()),
            playlist_id: Some(playlist_id.to_string()),
        }
    }

    #[tokio::test]
    async fn liked_videos_adapts_each_page() {
        let catalog =
            MockCatalog::new().with_liked_pages(vec![vec![rated("a"), rated("b")], vec![rated("c")]]);
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let Fetched::Complete(items) = importer.liked_videos().await.unwrap() else {
            panic!("unexpected abort");
        };
        let ids: Vec<_> = items.iter().map(|i| i.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(items.iter().all(|i| !i.mine));
    }

    #[tokio::test]
    async fn my_channel_without_channel_is_content_absence() {
        let catalog = MockCatalog::new(); // no own channel configured
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let fetched = importer.my_channel_uploads().await.unwrap();
        assert_eq!(fetched, Fetched::Complete(vec![]));
    }

    #[tokio::test]
    async fn my_channel_without_uploads_playlist_is_content_absence() {
        let catalog = MockCatalog::new().with_own_channel("chan-1", None);
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let fetched = importer.my_channel_uploads().await.unwrap();
        assert_eq!(fetched, Fetched::Complete(vec![]));
    }

    #[tokio::test]
    async fn my_channel_items_are_marked_mine() {
        let catalog = MockCatalog::new()
            .with_own_channel("chan-1", Some("uploads-1"))
            .with_playlist_pages(
                "uploads-1",
                vec![vec![playlist_entry("v1", "uploads-1")]],
            );
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let Fetched::Complete(items) = importer.my_channel_uploads().await.unwrap() else {
            panic!("unexpected abort");
        };
        assert_eq!(items.len(), 1);
        assert!(items[0].mine);
        assert_eq!(items[0].playlist_id.as_deref(), Some("uploads-1"));
    }

    #[tokio::test]
    async fn empty_playlist_id_returns_empty_without_fetching() {
        let catalog = MockCatalog::new();
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let fetched = importer.playlist("", false).await.unwrap();
        assert_eq!(fetched, Fetched::Complete(vec![]));
        assert_eq!(catalog.playlist_calls(), 0);
    }

    #[tokio::test]
    async fn watch_later_playlist_is_treated_as_mine() {
        let catalog = MockCatalog::new()
            .with_playlist_pages("WL-1", vec![vec![playlist_entry("v1", "WL-1")]]);
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let Fetched::Complete(items) = importer.playlist("WL-1", false).await.unwrap() else {
            panic!("unexpected abort");
        };
        assert!(items[0].mine);
    }

    #[tokio::test]
    async fn foreign_playlist_is_not_mine() {
        let catalog = MockCatalog::new()
            .with_playlist_pages("PL-x", vec![vec![playlist_entry("v1", "PL-x")]]);
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let Fetched::Complete(items) = importer.playlist("PL-x", false).await.unwrap() else {
            panic!("unexpected abort");
        };
        assert!(!items[0].mine);
    }

    #[tokio::test]
    async fn malformed_entries_are_skipped() {
        let catalog = MockCatalog::new().with_playlist_pages(
            "PL-1",
            vec![vec![
                playlist_entry("v1", "PL-1"),
                PlaylistItem {
                    kind: "youtube#deleted".to_string(),
                    video_id: Some("v2".to_string()),
                    playlist_id: Some("PL-1".to_string()),
                },
                PlaylistItem {
                    kind: KIND_PLAYLIST_ITEM.to_string(),
                    video_id: None,
                    playlist_id: Some("PL-1".to_string()),
                },
            ]],
        );
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let Fetched::Complete(items) = importer.playlist("PL-1", false).await.unwrap() else {
            panic!("unexpected abort");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].video_id, "v1");
    }

    #[tokio::test]
    async fn favorites_fill_budget_in_listing_order() {
        // Three favorite playlists with two items each, budget five: the
        // result is exactly five items drawn in listing order, no playlist
        // silently skipped.
        let catalog = MockCatalog::new()
            .with_playlist_pages(
                "fav-1",
                vec![vec![playlist_entry("a1", "fav-1"), playlist_entry("a2", "fav-1")]],
            )
            .with_playlist_pages(
                "fav-2",
                vec![vec![playlist_entry("b1", "fav-2"), playlist_entry("b2", "fav-2")]],
            )
            .with_playlist_pages(
                "fav-3",
                vec![vec![playlist_entry("c1", "fav-3"), playlist_entry("c2", "fav-3")]],
            );
        let identity = identity();
        let favorites = StaticFavorites::new(vec!["fav-1", "fav-2", "fav-3"]);
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &favorites, &gate, 5);

        let Fetched::Complete(items) = importer.favorite_playlists().await.unwrap() else {
            panic!("unexpected abort");
        };
        let ids: Vec<_> = items.iter().map(|i| i.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1", "b2", "c1"]);
    }

    #[tokio::test]
    async fn favorites_exhaustion_ends_before_budget() {
        let catalog = MockCatalog::new()
            .with_playlist_pages("fav-1", vec![vec![playlist_entry("a1", "fav-1")]]);
        let identity = identity();
        let favorites = StaticFavorites::new(vec!["fav-1"]);
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &favorites, &gate, 10);

        let Fetched::Complete(items) = importer.favorite_playlists().await.unwrap() else {
            panic!("unexpected abort");
        };
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn favorites_abort_propagates_from_inner_playlist() {
        let catalog = MockCatalog::new()
            .with_playlist_pages("fav-1", vec![vec![playlist_entry("a1", "fav-1")]])
            .with_playlist_pages("fav-2", vec![vec![playlist_entry("b1", "fav-2")]]);
        let identity = identity();
        let favorites = StaticFavorites::new(vec!["fav-1", "fav-2"]);
        // Polls: outer page (1), playlist fav-1 outer (2), inner fetch (3),
        // playlist fav-2 outer (4) -> cancel before its inner fetch runs.
        let gate = ScriptedGate::cancel_at_poll(4);
        let importer = ViewImporter::new(&catalog, &identity, &favorites, &gate, 10);

        let fetched = importer.favorite_playlists().await.unwrap();
        assert!(fetched.is_aborted());
        assert_eq!(catalog.playlist_calls(), 1);
    }

    #[tokio::test]
    async fn no_favorites_is_content_absence() {
        let catalog = MockCatalog::new();
        let identity = identity();
        let gate = ScriptedGate::never();
        let importer = ViewImporter::new(&catalog, &identity, &NoFavorites, &gate, 10);

        let fetched = importer.favorite_playlists().await.unwrap();
        assert_eq!(fetched, Fetched::Complete(vec![]));
    }
}
