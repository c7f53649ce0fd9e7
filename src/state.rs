//! Shared state handed to every route through an Axum `Extension`.

use std::sync::Arc;

use crate::cache::SnapshotCache;
use crate::models::Tab;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
    pub tabs: Arc<[Tab]>,
}

impl AppState {
    pub fn new(cache: SnapshotCache, tabs: &[Tab]) -> Self {
        Self {
            cache: Arc::new(cache),
            tabs: Arc::from(tabs),
        }
    }

    /// Tabs a request should compute: the one it asked for, or every enabled
    /// tab. `None` when the requested tab is not enabled here.
    pub fn tabs_for(&self, requested: Option<Tab>) -> Option<Vec<Tab>> {
        match requested {
            Some(tab) if self.tabs.contains(&tab) => Some(vec![tab]),
            Some(_) => None,
            None => Some(self.tabs.to_vec()),
        }
    }
}
