// # Provider Readiness
//
// Cheap checks the host runs before scheduling an import. They gate runs,
// they don't start them.

use crate::catalog::VideoCatalog;
use crate::import::ViewKey;
use tracing::debug;

/// Whether the media provider is usable at all: the catalog client holds
/// credentials.
pub fn provider_ready(catalog: &dyn VideoCatalog) -> bool {
    catalog.is_authenticated()
}

/// Whether an import is worth scheduling: authenticated and at least one
/// view configured.
pub fn import_ready(catalog: &dyn VideoCatalog, view_keys: &[ViewKey]) -> bool {
    if !catalog.is_authenticated() {
        debug!("import not ready: not authenticated");
        return false;
    }
    if view_keys.is_empty() {
        debug!("import not ready: no views configured");
        return false;
    }
    true
}
