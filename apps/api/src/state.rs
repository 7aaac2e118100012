use std::sync::Arc;

use crate::extraction::Extractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
}
