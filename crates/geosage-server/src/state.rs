//! Shared application state.

use std::sync::Arc;

use geosage_runtime::GeoParser;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Shared by every request; the pipeline itself is synchronous.
    /// Its configuration is reachable through `GeoParser::config`.
    pub parser: Arc<GeoParser>,
}

impl AppState {
    pub fn new(parser: GeoParser) -> Self {
        Self {
            parser: Arc::new(parser),
        }
    }
}
