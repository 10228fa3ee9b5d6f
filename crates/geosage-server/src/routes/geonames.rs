//! Gazetteer lookup by id.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use geosage_runtime::error_envelope;
use serde::Deserialize;
use serde_json::Value;

use super::run_parser;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/geonames", get(get_geoname))
}

#[derive(Debug, Deserialize)]
pub struct GeonameQuery {
    pub id: Option<String>,
}

/// GET /geonames?id=3492908
async fn get_geoname(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeonameQuery>,
) -> Json<Value> {
    let raw = query.id.unwrap_or_default();
    match raw.trim().parse::<i64>() {
        Ok(id) => run_parser(&state, move |parser| parser.geoname_info(id)).await,
        Err(_) => Json(error_envelope(format!("Invalid GeoNames id {}", raw))),
    }
}
