// # Import Orchestrator
//
// Drives one import run: iterates configured media types × resolved views,
// dispatches each view to its strategy, re-clamps the batch to the budget
// and hands it to the host sink. The run either commits (all pairs visited)
// or aborts cleanly on a cancellation signal; transport errors propagate
// out untouched.

use crate::catalog::{CatalogError, VideoCatalog};
use crate::identity::{FavoritePlaylistStore, UserIdentity};
use crate::import::context::ImportContext;
use crate::import::fetcher::Fetched;
use crate::import::strategies::ViewImporter;
use crate::import::types::{CancellationGate, ImportOutcome, ImportSink, ProgressSink};
use crate::import::views::{resolve_views, View, ViewKey, ViewMode};
use tracing::{error, info};

/// One-run import orchestrator.
///
/// Owns nothing: all collaborators are host-provided borrows, alive for the
/// duration of the run. Construct a fresh runner per run.
pub struct ImportRunner<'a> {
    catalog: &'a dyn VideoCatalog,
    identity: &'a UserIdentity,
    favorites: &'a dyn FavoritePlaylistStore,
    gate: &'a dyn CancellationGate,
    progress: &'a dyn ProgressSink,
    sink: &'a dyn ImportSink,
}

impl<'a> ImportRunner<'a> {
    pub fn new(
        catalog: &'a dyn VideoCatalog,
        identity: &'a UserIdentity,
        favorites: &'a dyn FavoritePlaylistStore,
        gate: &'a dyn CancellationGate,
        progress: &'a dyn ProgressSink,
        sink: &'a dyn ImportSink,
    ) -> Self {
        Self {
            catalog,
            identity,
            favorites,
            gate,
            progress,
            sink,
        }
    }

    /// Run an import over the configured view keys.
    ///
    /// Keys that don't resolve against the registry are dropped silently;
    /// an empty resolution means there is nothing to import, which commits
    /// immediately.
    pub async fn run(
        &self,
        media_types: &[String],
        view_keys: &[ViewKey],
        budget: usize,
    ) -> Result<ImportOutcome, CatalogError> {
        let views = resolve_views(view_keys, self.identity);
        self.run_resolved(media_types, &views, budget).await
    }

    /// Run an import over already-resolved views.
    pub async fn run_resolved(
        &self,
        media_types: &[String],
        views: &[View],
        budget: usize,
    ) -> Result<ImportOutcome, CatalogError> {
        if views.is_empty() {
            info!("no views to import from");
            return Ok(ImportOutcome::Committed);
        }

        info!("importing {:?} items...", media_types);

        let media_total = media_types.len();
        for (media_index, media_type) in media_types.iter().enumerate() {
            if self.gate.should_cancel(media_index, media_total) {
                return Ok(ImportOutcome::Aborted);
            }

            let view_total = views.len();
            for (view_index, view) in views.iter().enumerate() {
                info!("importing {} items from {}...", media_type, view.label);
                self.progress.report_progress(&format!(
                    "Retrieving {} from {}...",
                    media_type, view.label
                ));

                if self.gate.should_cancel(view_index, view_total) {
                    return Ok(ImportOutcome::Aborted);
                }

                // Fresh per-view state; never shared across views.
                let context = ImportContext::from_key(&view.key);
                let importer = ViewImporter::new(
                    self.catalog,
                    self.identity,
                    self.favorites,
                    self.gate,
                    budget,
                );

                let fetched = match context.mode {
                    ViewMode::MyChannel => importer.my_channel_uploads().await?,
                    ViewMode::LikedVideos => importer.liked_videos().await?,
                    ViewMode::Playlist => {
                        let playlist_id = context.param("playlist_id").unwrap_or_default();
                        importer.playlist(playlist_id, false).await?
                    }
                    ViewMode::FavoritePlaylists => importer.favorite_playlists().await?,
                    ViewMode::Unknown => {
                        // A resolved view with no strategy is a logic error,
                        // but only for this view.
                        error!(
                            "no strategy for view \"{}\" ({}), skipping",
                            view.label, view.key
                        );
                        continue;
                    }
                };

                let mut items = match fetched {
                    Fetched::Complete(items) => items,
                    Fetched::Aborted => return Ok(ImportOutcome::Aborted),
                };

                // Strategies respect the budget themselves; re-clamp anyway
                // since composed strategies can overshoot at the boundary.
                if items.len() > budget {
                    items.truncate(budget);
                }

                if !items.is_empty() {
                    info!(
                        "{} {} items imported from {}",
                        items.len(),
                        media_type,
                        view.label
                    );
                    self.sink.deliver(items, media_type);
                }
            }
        }

        Ok(ImportOutcome::Committed)
    }
}
