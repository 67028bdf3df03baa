//! OpenRouter-style adapter: Responses API over reqwest with a fixed
//! 30-second request timeout. The request body differs from the OpenAI
//! adapter's (`max_output_tokens` vs `max_tokens`); the response envelope is
//! returned raw for the shared extractor.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::providers::QuestionProvider;
use crate::util::trunc_for_log;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_OUTPUT_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct ResponsesRequest<'a> {
  model: &'a str,
  input: &'a str,
  temperature: f32,
  max_output_tokens: u32,
}

pub struct OpenRouterProvider {
  client: Option<reqwest::Client>,
  api_key: Option<String>,
  base_url: String,
}

impl OpenRouterProvider {
  /// Build from OPENROUTER_API_KEY / OPENROUTER_BASE_URL. A missing key is
  /// not fatal here, only at first use.
  pub fn from_env() -> Self {
    Self::new(
      std::env::var("OPENROUTER_API_KEY").ok(),
      std::env::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
    )
  }

  pub fn new(api_key: Option<String>, base_url: String) -> Self {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().ok();
    Self { client, api_key, base_url }
  }
}

#[async_trait]
impl QuestionProvider for OpenRouterProvider {
  fn name(&self) -> &'static str { "openrouter" }

  #[instrument(level = "info", skip(self, prompt), fields(%model, prompt_len = prompt.len()))]
  async fn complete(&self, prompt: &str, model: &str) -> Result<Value, ApiError> {
    let Some(api_key) = &self.api_key else {
      return Err(ApiError::ConfigurationMissing("OPENROUTER_API_KEY"));
    };
    let Some(client) = &self.client else {
      return Err(ApiError::DependencyMissing(
        "no se pudo inicializar el cliente HTTP de openrouter".into(),
      ));
    };

    let url = format!("{}/responses", self.base_url);
    let req = ResponsesRequest {
      model,
      input: prompt,
      temperature: TEMPERATURE,
      max_output_tokens: MAX_OUTPUT_TOKENS,
    };

    let start = std::time::Instant::now();
    // Timeouts surface as transport errors like any other send failure.
    let res = client
      .post(&url)
      .header(USER_AGENT, "colidea-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| ApiError::Transport { provider: "openrouter", status: None, detail: e.to_string() })?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      error!(target: "generate", %status, body = %trunc_for_log(&body, 300), "OpenRouter call failed");
      return Err(ApiError::Transport {
        provider: "openrouter",
        status: Some(status.as_u16()),
        detail: body,
      });
    }

    let envelope: Value = res
      .json()
      .await
      .map_err(|_| ApiError::Extraction)?;
    info!(target: "generate", elapsed = ?start.elapsed(), "OpenRouter envelope received");
    Ok(envelope)
  }
}
