//! Geoparsing routes.

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use super::{flag, run_parser};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/parse/text", get(parse_text_get).post(parse_text_post))
        .route("/parse/sentences", post(parse_sentences))
        .route("/parse/json", post(parse_json))
}

#[derive(Debug, Default, Deserialize)]
pub struct TextParams {
    pub q: Option<String>,
    #[serde(rename = "replaceAllDemonyms")]
    pub replace_all_demonyms: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DemonymParams {
    #[serde(rename = "replaceAllDemonyms")]
    pub replace_all_demonyms: Option<String>,
}

/// GET /parse/text?q=...&replaceAllDemonyms=true
async fn parse_text_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextParams>,
) -> Json<Value> {
    parse_text(state, params).await
}

/// POST /parse/text with a form-encoded body.
async fn parse_text_post(
    State(state): State<Arc<AppState>>,
    Form(params): Form<TextParams>,
) -> Json<Value> {
    parse_text(state, params).await
}

async fn parse_text(state: Arc<AppState>, params: TextParams) -> Json<Value> {
    let replace = flag(params.replace_all_demonyms.as_deref());
    let text = params.q.unwrap_or_default();
    run_parser(&state, move |parser| parser.parse_text(&text, replace)).await
}

/// POST /parse/sentences: body is a JSON array of sentences.
async fn parse_sentences(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DemonymParams>,
    body: String,
) -> Json<Value> {
    let replace = flag(params.replace_all_demonyms.as_deref());
    run_parser(&state, move |parser| parser.parse_sentences(&body, replace)).await
}

/// POST /parse/json: body holds entities from an upstream NLP step.
async fn parse_json(State(state): State<Arc<AppState>>, body: String) -> Json<Value> {
    run_parser(&state, move |parser| parser.parse_nlp_json(&body)).await
}
