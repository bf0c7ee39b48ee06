//! Shared state for the local HTTP server.

use std::sync::Arc;

use posts_core::storage::PostRepository;

/// Cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// State backed by an empty in-memory repository.
    fn default() -> Self {
        Self::new(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}
