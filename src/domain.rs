//! Domain models: the generation request, its prompt configuration, and the
//! question schema produced by a successful generation call.

use serde::{Deserialize, Serialize};

fn default_question_count() -> u32 { 8 }
fn default_alternatives() -> u32 { 4 }

/// Pedagogical knobs for one generation call. Immutable once deserialized.
#[derive(Clone, Debug, Deserialize)]
pub struct PromptConfig {
  /// Bloom taxonomy labels, e.g. "Análisis", "Comprensión". Must be non-empty.
  pub bloom_levels: Vec<String>,
  /// Question formats, e.g. "Desarrollo", "Tipo test". Must be non-empty.
  pub question_types: Vec<String>,
  #[serde(default)]
  pub context: Option<String>,
  #[serde(default)]
  pub target_audience: Option<String>,
  #[serde(default = "default_question_count")]
  pub number_of_questions: u32,
  #[serde(default = "default_alternatives")]
  pub alternatives_per_question: u32,
}

/// One generation call: the instructor's syllabus text plus configuration.
/// Created per request and discarded after use.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerationRequest {
  pub syllabus_text: String,
  pub prompt_config: PromptConfig,
}

/// The fixed question schema every provider response is normalized into.
/// Never partially constructed: parsing is all-or-nothing per response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedQuestion {
  pub question: String,
  pub question_type: String,
  pub cognitive_level: String,
  pub answer_hint: String,
}
