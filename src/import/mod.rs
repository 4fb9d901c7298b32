// # Import Module
//
// The view-driven, paginated, cancellable import pipeline:
//
// - **views**: view keys, the static registry, watch-later rebinding
// - **fetcher**: the shared budgeted pagination loop
// - **strategies**: per-mode item retrieval built on the fetcher
// - **service**: the orchestrator iterating media types × views
// - **types**: host seams (cancellation gate, progress and import sinks)
//
// Public API:
// - `ImportRunner`: run one import over configured view keys
// - `resolve_views` / `available_views`: registry resolution
// - `CancellationGate` / `ProgressSink` / `ImportSink`: host callbacks

mod context;
mod fetcher;
mod service;
mod strategies;
mod types;
mod views;

pub use context::ImportContext;
pub use fetcher::{fetch_paged, Fetched};
pub use service::ImportRunner;
pub use strategies::ViewImporter;
pub use types::{CancellationGate, ImportOutcome, ImportSink, NeverCancel, ProgressSink};
pub use views::{available_views, resolve_views, View, ViewKey, ViewMode};
