//! OpenAI-style adapter: Responses API over reqwest.
//!
//! Calls are instrumented and log model names, latencies, and response sizes
//! (not contents). We never log the API key and keep payload truncations
//! short to avoid PII leaks.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::providers::QuestionProvider;
use crate::util::trunc_for_log;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct ResponsesRequest<'a> {
  model: &'a str,
  input: &'a str,
  max_tokens: u32,
  temperature: f32,
}

pub struct OpenAiProvider {
  // None when the TLS-backed client could not be built in this environment.
  client: Option<reqwest::Client>,
  api_key: Option<String>,
  base_url: String,
}

impl OpenAiProvider {
  /// Build from OPENAI_API_KEY / OPENAI_BASE_URL. A missing key is not fatal
  /// here, only at first use. No explicit timeout: this adapter relies on
  /// the client's default behavior.
  pub fn from_env() -> Self {
    Self::new(
      std::env::var("OPENAI_API_KEY").ok(),
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
    )
  }

  pub fn new(api_key: Option<String>, base_url: String) -> Self {
    let client = reqwest::Client::builder().build().ok();
    Self { client, api_key, base_url }
  }
}

#[async_trait]
impl QuestionProvider for OpenAiProvider {
  fn name(&self) -> &'static str { "openai" }

  #[instrument(level = "info", skip(self, prompt), fields(%model, prompt_len = prompt.len()))]
  async fn complete(&self, prompt: &str, model: &str) -> Result<Value, ApiError> {
    // Both preconditions are checked before any network traffic.
    let Some(client) = &self.client else {
      return Err(ApiError::DependencyMissing(
        "no se pudo inicializar el cliente HTTP de openai".into(),
      ));
    };
    let Some(api_key) = &self.api_key else {
      return Err(ApiError::ConfigurationMissing("OPENAI_API_KEY"));
    };

    let url = format!("{}/responses", self.base_url);
    let req = ResponsesRequest { model, input: prompt, max_tokens: MAX_TOKENS, temperature: TEMPERATURE };

    let start = std::time::Instant::now();
    let res = client
      .post(&url)
      .header(USER_AGENT, "colidea-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| ApiError::Transport { provider: "openai", status: None, detail: e.to_string() })?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      error!(target: "generate", %status, body = %trunc_for_log(&body, 300), "OpenAI call failed");
      return Err(ApiError::Transport {
        provider: "openai",
        status: Some(status.as_u16()),
        detail: body,
      });
    }

    let envelope: Value = res
      .json()
      .await
      .map_err(|_| ApiError::Extraction)?;
    info!(target: "generate", elapsed = ?start.elapsed(), "OpenAI envelope received");
    Ok(envelope)
  }
}
