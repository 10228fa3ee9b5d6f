//! HTTP route handlers.

pub mod geonames;
pub mod parse;
pub mod version;

use std::sync::Arc;

use axum::{Json, Router};
use geosage_runtime::{error_envelope, GeoParser};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(parse::routes())
        .merge(geonames::routes())
        .merge(version::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run a parser call on the blocking pool.
pub(crate) async fn run_parser<F>(state: &Arc<AppState>, call: F) -> Json<Value>
where
    F: FnOnce(&GeoParser) -> Value + Send + 'static,
{
    let parser = Arc::clone(&state.parser);
    match tokio::task::spawn_blocking(move || call(&parser)).await {
        Ok(envelope) => Json(envelope),
        Err(e) => {
            error!("Parser task failed: {}", e);
            Json(error_envelope(format!("Parser task failed: {}", e)))
        }
    }
}

/// Boolean request parameters arrive as "true"/"false" strings.
pub(crate) fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag() {
        assert!(flag(Some("true")));
        assert!(flag(Some(" TRUE ")));
        assert!(!flag(Some("yes")));
        assert!(!flag(None));
    }
}
