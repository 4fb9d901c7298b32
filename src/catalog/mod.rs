// # Remote Video Catalog
//
// Transport seam between the import core and the remote paged API.
// The import pipeline only ever talks to the `VideoCatalog` trait;
// `CatalogClient` is the reqwest implementation against the real service and
// `test_support::MockCatalog` the scripted one for tests.

mod client;
mod models;

pub use client::{CatalogClient, CatalogError, KIND_PLAYLIST_ITEM, KIND_VIDEO};
pub use models::{Channel, Page, PlaylistItem, RatedVideo};

use async_trait::async_trait;

/// Paged read access to the remote catalog.
///
/// All listing calls are synchronous from the import core's point of view:
/// one request in flight at a time, no internal retry or timeout policy.
/// Errors are fatal to the calling import run.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// Whether the client holds credentials. Used by readiness checks only;
    /// an expired token still surfaces as `Unauthorized` at call time.
    fn is_authenticated(&self) -> bool;

    /// Resolve the authenticated user's own channel.
    /// `Ok(None)` means the lookup succeeded but no channel exists.
    async fn my_channel(&self) -> Result<Option<Channel>, CatalogError>;

    /// Look up a channel by id.
    async fn channel(&self, channel_id: &str) -> Result<Option<Channel>, CatalogError>;

    /// One page of the user's liked videos.
    async fn liked_videos(&self, page_token: Option<&str>)
        -> Result<Page<RatedVideo>, CatalogError>;

    /// One page of a playlist's items.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<PlaylistItem>, CatalogError>;
}
