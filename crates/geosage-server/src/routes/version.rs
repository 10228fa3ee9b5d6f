//! Parser version.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use geosage_runtime::{PARSER_VERSION, STATUS_OK};
use serde_json::Value;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/version", get(get_version))
}

/// GET /version
async fn get_version() -> Json<Value> {
    Json(serde_json::json!({
        "status": STATUS_OK,
        "version": PARSER_VERSION,
    }))
}
