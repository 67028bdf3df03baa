//! The generation pipeline shared by HTTP handlers:
//! validate → compile prompt → dispatch to a provider → normalize the
//! envelope → parse the question list. Every step's failure is terminal to
//! the request; nothing is retried or silently swallowed.

use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::{GeneratedQuestion, GenerationRequest};
use crate::error::ApiError;
use crate::extract::{extract_response_text, parse_questions};
use crate::prompt::compile_prompt;
use crate::state::AppState;

/// Reject malformed requests before any provider call.
pub fn validate_request(req: &GenerationRequest) -> Result<(), ApiError> {
  if req.syllabus_text.trim().is_empty() {
    return Err(ApiError::Validation("syllabus_text no puede estar vacío".into()));
  }
  let cfg = &req.prompt_config;
  if cfg.bloom_levels.is_empty() {
    return Err(ApiError::Validation("bloom_levels debe tener al menos un nivel".into()));
  }
  if cfg.question_types.is_empty() {
    return Err(ApiError::Validation("question_types debe tener al menos un tipo".into()));
  }
  if cfg.number_of_questions == 0 {
    return Err(ApiError::Validation("number_of_questions debe ser positivo".into()));
  }
  if cfg.alternatives_per_question == 0 {
    return Err(ApiError::Validation("alternatives_per_question debe ser positivo".into()));
  }
  Ok(())
}

/// Run one full generation call against the currently active configuration.
#[instrument(level = "info", skip(state, req), fields(syllabus_len = req.syllabus_text.len(), count = req.prompt_config.number_of_questions))]
pub async fn generate_questions(
  state: &AppState,
  req: &GenerationRequest,
) -> Result<Vec<GeneratedQuestion>, ApiError> {
  validate_request(req)?;

  let generation_id = Uuid::new_v4();
  let cfg = state.config.get().await;
  let prompt = compile_prompt(req, &cfg.prompt_template);
  let provider = state.provider_for(&cfg.provider);

  info!(
    target: "generate",
    %generation_id,
    provider = provider.name(),
    model = %cfg.model,
    prompt_len = prompt.len(),
    "Dispatching compiled prompt"
  );

  let envelope = provider.complete(&prompt, &cfg.model).await.map_err(|e| {
    error!(target: "generate", %generation_id, provider = provider.name(), error = %e, "Provider call failed");
    e
  })?;

  let text = extract_response_text(&envelope)?;
  let questions = parse_questions(&text)?;
  info!(target: "generate", %generation_id, questions = questions.len(), "Generation succeeded");
  Ok(questions)
}
