use crate::import::views::{ViewKey, ViewMode};
use std::collections::BTreeMap;

/// Per-view execution state: the decoded mode and parameters of one
/// configured view.
///
/// Built fresh for every (media type, view) pair by the orchestrator and
/// discarded once that view's items are collected; never shared across
/// views.
#[derive(Debug, Clone)]
pub struct ImportContext {
    pub mode: ViewMode,
    pub params: BTreeMap<String, String>,
}

impl ImportContext {
    pub fn from_key(key: &ViewKey) -> Self {
        Self {
            mode: key.mode(),
            params: key.params(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
