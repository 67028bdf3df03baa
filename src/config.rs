//! Active configuration: which provider/model/template the service uses.
//!
//! The store is the only piece of mutable shared state in the process. Every
//! read and write goes through one mutex, and updates persist to the backing
//! JSON file before they become visible, so a concurrent generation request
//! never observes a half-applied administrative update.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::prompt::DEFAULT_PROMPT_TEMPLATE;

/// The persisted configuration record. The backing file must be a JSON object
/// with exactly these three fields; any other shape is treated as corrupt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ActiveConfig {
  pub provider: String,
  pub model: String,
  pub prompt_template: String,
}

impl ActiveConfig {
  /// Defaults derived from the environment, used only when no persisted
  /// configuration exists (or the file is corrupt).
  ///
  /// Env variables:
  ///   COLIDEA_PROVIDER : "openai" | "openrouter" (default "openrouter")
  ///   COLIDEA_MODEL    : model id (default depends on provider)
  pub fn from_env() -> Self {
    let provider = std::env::var("COLIDEA_PROVIDER")
      .map(|p| p.trim().to_lowercase())
      .unwrap_or_else(|_| "openrouter".into());
    let default_model = if provider == "openrouter" {
      "openrouter/google/gpt-4o-mini"
    } else {
      "gpt-4o-mini"
    };
    let model = std::env::var("COLIDEA_MODEL").unwrap_or_else(|_| default_model.into());
    Self { provider, model, prompt_template: DEFAULT_PROMPT_TEMPLATE.into() }
  }
}

/// File-backed configuration store. Constructed once at startup and handed to
/// every component by reference, never ambient global state.
pub struct ConfigStore {
  path: PathBuf,
  current: Mutex<ActiveConfig>,
}

impl ConfigStore {
  /// Open the store at `path`.
  ///
  /// - Missing file: `defaults` is persisted first, so `get` always succeeds
  ///   after initialization.
  /// - Corrupt file: `defaults` is used in memory for this process lifetime,
  ///   WITHOUT rewriting the file — it may be fixed externally, and silently
  ///   overwriting it would hide the inconsistency.
  #[instrument(level = "info", skip(defaults), fields(path = %path.display()))]
  pub fn open(path: PathBuf, defaults: ActiveConfig) -> Self {
    let initial = match std::fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str::<ActiveConfig>(&raw) {
        Ok(cfg) => {
          info!(target: "colidea_backend", provider = %cfg.provider, model = %cfg.model, "Loaded persisted configuration");
          cfg
        }
        Err(e) => {
          error!(target: "colidea_backend", error = %e, "Config file is corrupt; using env defaults for this process (file left untouched)");
          defaults
        }
      },
      Err(_) => {
        if let Err(e) = persist(&path, &defaults) {
          error!(target: "colidea_backend", error = %e, "Could not persist default configuration");
        } else {
          info!(target: "colidea_backend", provider = %defaults.provider, model = %defaults.model, "No config file found; persisted env defaults");
        }
        defaults
      }
    };
    Self { path, current: Mutex::new(initial) }
  }

  /// Current configuration (clone taken under the lock).
  pub async fn get(&self) -> ActiveConfig {
    self.current.lock().await.clone()
  }

  /// Replace the configuration atomically: persisted to disk before the
  /// in-memory swap, both under the lock. On persist failure the previous
  /// value stays active.
  #[instrument(level = "info", skip(self, prompt_template), fields(%provider, %model, template_len = prompt_template.len()))]
  pub async fn update(
    &self,
    provider: String,
    model: String,
    prompt_template: String,
  ) -> Result<ActiveConfig, ApiError> {
    let mut current = self.current.lock().await;
    let next = ActiveConfig { provider, model, prompt_template };
    persist(&self.path, &next).map_err(|e| ApiError::Storage(e.to_string()))?;
    *current = next.clone();
    info!(target: "colidea_backend", provider = %next.provider, model = %next.model, "Configuration updated and persisted");
    Ok(next)
  }
}

fn persist(path: &Path, cfg: &ActiveConfig) -> std::io::Result<()> {
  let body = serde_json::to_string_pretty(cfg).map_err(std::io::Error::other)?;
  std::fs::write(path, body)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;
  use uuid::Uuid;

  fn tmp_path() -> PathBuf {
    std::env::temp_dir().join(format!("colidea-config-{}.json", Uuid::new_v4()))
  }

  fn defaults() -> ActiveConfig {
    ActiveConfig {
      provider: "openai".into(),
      model: "gpt-4o-mini".into(),
      prompt_template: "t: {syllabus_text}".into(),
    }
  }

  #[tokio::test]
  async fn missing_file_persists_defaults_before_first_read() {
    let path = tmp_path();
    let store = ConfigStore::open(path.clone(), defaults());
    assert_eq!(store.get().await, defaults());
    // The defaults landed on disk, not just in memory.
    let raw = std::fs::read_to_string(&path).unwrap();
    let on_disk: ActiveConfig = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk, defaults());
    std::fs::remove_file(path).ok();
  }

  #[tokio::test]
  async fn update_then_get_reflects_exactly_the_written_value() {
    let path = tmp_path();
    let store = ConfigStore::open(path.clone(), defaults());
    store
      .update("openrouter".into(), "openrouter/x".into(), "nuevo {syllabus_text}".into())
      .await
      .unwrap();
    let cfg = store.get().await;
    assert_eq!(cfg.provider, "openrouter");
    assert_eq!(cfg.model, "openrouter/x");
    assert_eq!(cfg.prompt_template, "nuevo {syllabus_text}");
    // Persisted copy matches the live value.
    let on_disk: ActiveConfig =
      serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, cfg);
    std::fs::remove_file(path).ok();
  }

  #[tokio::test]
  async fn corrupt_file_defaults_without_rewriting_it() {
    let path = tmp_path();
    std::fs::write(&path, "{\"provider\": \"openai\", \"extra\": true}").unwrap();
    let store = ConfigStore::open(path.clone(), defaults());
    assert_eq!(store.get().await, defaults());
    // The corrupt file stays as-is for external repair.
    assert_eq!(
      std::fs::read_to_string(&path).unwrap(),
      "{\"provider\": \"openai\", \"extra\": true}"
    );
    std::fs::remove_file(path).ok();
  }

  #[tokio::test]
  async fn concurrent_updates_are_serialized_last_writer_wins() {
    let path = tmp_path();
    let store = Arc::new(ConfigStore::open(path.clone(), defaults()));
    let mut handles = Vec::new();
    for i in 0..8u32 {
      let store = store.clone();
      handles.push(tokio::spawn(async move {
        store
          .update("openai".into(), format!("model-{i}"), "t".into())
          .await
          .unwrap();
      }));
    }
    for h in handles {
      h.await.unwrap();
    }
    // Whatever update won, the read and the file agree on it.
    let cfg = store.get().await;
    assert!(cfg.model.starts_with("model-"));
    let on_disk: ActiveConfig =
      serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, cfg);
    std::fs::remove_file(path).ok();
  }
}
