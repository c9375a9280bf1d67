use std::sync::Arc;

use doctext_core::Extractor;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub extractor: Arc<Extractor>,
}
