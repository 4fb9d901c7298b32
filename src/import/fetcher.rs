// # Paged Fetcher
//
// The one pagination loop in the crate. Every listing endpoint (ratings,
// playlist items, channel uploads) shares the same page-by-page shape, so it
// is factored once and the cancellation poll has a single auditable
// location.

use crate::catalog::{CatalogError, Page};
use crate::import::types::CancellationGate;
use futures::future::BoxFuture;

/// Result of a budgeted paged fetch.
///
/// `Aborted` means the gate signaled cancellation; items accumulated within
/// the aborted call are discarded so callers never partially commit.
/// `Complete` may hold fewer than `budget` items only when the source was
/// exhausted first.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Complete(Vec<T>),
    Aborted,
}

impl<T> Fetched<T> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Fetched::Aborted)
    }
}

/// Fetch pages until `budget` items are adapted, the source is exhausted, or
/// the gate signals cancellation.
///
/// `fetch_page` is called with the page token to request (`None` for the
/// first page). `adapt` turns a raw item into an importable one; returning
/// `None` skips the raw item silently (malformed entry). Transport errors
/// from `fetch_page` propagate unchanged and are fatal to the caller's run.
pub async fn fetch_paged<'a, R, T>(
    budget: usize,
    gate: &dyn CancellationGate,
    mut fetch_page: impl FnMut(Option<String>) -> BoxFuture<'a, Result<Page<R>, CatalogError>> + 'a,
    mut adapt: impl FnMut(R) -> Option<T>,
) -> Result<Fetched<T>, CatalogError> {
    let mut collected: Vec<T> = Vec::new();
    let mut token: Option<String> = None;

    while collected.len() < budget {
        if gate.should_cancel(collected.len(), budget) {
            return Ok(Fetched::Aborted);
        }

        let page = fetch_page(token.take()).await?;
        if page.items.is_empty() {
            // Graceful exhaustion, not an error.
            break;
        }

        collected.extend(page.items.into_iter().filter_map(&mut adapt));

        match page.next_page_token {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => break,
        }
    }

    collected.truncate(budget);
    Ok(Fetched::Complete(collected))
}
