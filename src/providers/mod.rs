//! Provider adapters. Each one knows how to turn a compiled prompt into a
//! provider-specific HTTP request and what the success/failure shape of its
//! own transport looks like. The raw response envelope is returned untouched;
//! normalization lives in `crate::extract`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

pub mod openai;
pub mod openrouter;

pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;

/// One capability, two implementations. Requests are single-shot: no retry,
/// no backoff; every failure surfaces to the caller on first occurrence.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
  /// Stable identifier used in logs and error details.
  fn name(&self) -> &'static str;

  /// Send `prompt` to `model` and return the provider's raw envelope.
  async fn complete(&self, prompt: &str, model: &str) -> Result<Value, ApiError>;
}
