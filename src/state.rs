use std::sync::Arc;

use crate::tournaments::ballots::slots::Taxonomy;

/// Shared by every request handler. The engine itself is stateless; the only
/// thing worth sharing is the slot catalog.
#[derive(Clone, Debug)]
pub struct AppState {
    pub taxonomy: Arc<Taxonomy>,
}

impl AppState {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Taxonomy::standard())
    }
}
