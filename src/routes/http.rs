//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::domain::{GeneratedQuestion, GenerationRequest};
use crate::error::ApiError;
use crate::logic::generate_questions;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> Json<HealthOut> {
  let cfg = state.config.get().await;
  Json(HealthOut { status: "ready", model: cfg.model, provider: cfg.provider })
}

#[instrument(level = "info", skip(state, body), fields(syllabus_len = body.syllabus_text.len()))]
pub async fn http_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerationRequest>,
) -> Result<Json<Vec<GeneratedQuestion>>, ApiError> {
  let questions = generate_questions(&state, &body).await?;
  info!(target: "generate", questions = questions.len(), "HTTP generate served");
  Ok(Json(questions))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_config(State(state): State<Arc<AppState>>) -> Json<ConfigOut> {
  Json(state.config.get().await.into())
}

#[instrument(level = "info", skip(state, body), fields(provider = %body.provider, model = %body.model))]
pub async fn http_update_config(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ConfigUpdateIn>,
) -> Result<Json<ConfigAck>, ApiError> {
  state
    .config
    .update(body.provider, body.model, body.prompt_template)
    .await?;
  Ok(Json(ConfigAck { ok: true }))
}
