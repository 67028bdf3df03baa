//! Colidea · Generador de preguntas de evaluación (backend)
//!
//! - Axum HTTP API
//! - Two interchangeable LLM providers (OpenAI-style, OpenRouter-style)
//! - Hot-reloadable configuration (provider/model/prompt template)
//!
//! Important env variables:
//!   PORT                : u16 (default 8000)
//!   COLIDEA_PROVIDER    : "openai" | "openrouter" (default "openrouter")
//!   COLIDEA_MODEL       : default depends on provider
//!   COLIDEA_CONFIG_PATH : persisted configuration file (default ./colidea_config.json)
//!   OPENAI_API_KEY      : credential for the OpenAI-style adapter
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENROUTER_API_KEY  : credential for the OpenRouter-style adapter
//!   OPENROUTER_BASE_URL : default "https://openrouter.ai/api/v1"
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use colidea_backend::routes::build_router;
use colidea_backend::state::AppState;
use colidea_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (config store + provider adapters).
  let state = Arc::new(AppState::from_env());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 8000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "colidea_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
