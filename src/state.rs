//! Application state: the configuration store plus the two provider adapters.
//!
//! Both adapters are constructed once at startup; which one serves a given
//! request is decided per call from the active configuration, so an
//! administrative provider switch takes effect without a restart.

use tracing::{info, instrument, warn};

use crate::config::{ActiveConfig, ConfigStore};
use crate::providers::{OpenAiProvider, OpenRouterProvider, QuestionProvider};

pub struct AppState {
    pub config: ConfigStore,
    pub openai: OpenAiProvider,
    pub openrouter: OpenRouterProvider,
}

impl AppState {
    /// Build state from env: config store (COLIDEA_CONFIG_PATH, default
    /// ./colidea_config.json) and both adapters.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        let path = std::env::var("COLIDEA_CONFIG_PATH")
            .unwrap_or_else(|_| "./colidea_config.json".into());
        let config = ConfigStore::open(path.into(), ActiveConfig::from_env());
        let state = Self::new(config, OpenAiProvider::from_env(), OpenRouterProvider::from_env());
        info!(target: "colidea_backend", "Provider adapters initialized (openai, openrouter)");
        state
    }

    /// Explicit constructor; tests inject a store and adapters pointed at
    /// mock servers.
    pub fn new(config: ConfigStore, openai: OpenAiProvider, openrouter: OpenRouterProvider) -> Self {
        Self { config, openai, openrouter }
    }

    /// Dispatch on the configured provider identifier. The value is
    /// administrator-controlled free text, so unknown identifiers fall back
    /// to the OpenAI-style adapter deterministically instead of failing.
    pub fn provider_for(&self, provider: &str) -> &dyn QuestionProvider {
        match provider {
            "openrouter" => &self.openrouter,
            "openai" => &self.openai,
            other => {
                warn!(target: "generate", provider = %other, "Unknown provider id; defaulting to openai");
                &self.openai
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_state() -> AppState {
        let path = std::env::temp_dir().join(format!("colidea-state-{}.json", Uuid::new_v4()));
        let defaults = ActiveConfig {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            prompt_template: "t".into(),
        };
        AppState::new(
            ConfigStore::open(path, defaults),
            OpenAiProvider::new(None, "http://localhost:9".into()),
            OpenRouterProvider::new(None, "http://localhost:9".into()),
        )
    }

    #[test]
    fn dispatcher_routes_known_identifiers() {
        let state = test_state();
        assert_eq!(state.provider_for("openai").name(), "openai");
        assert_eq!(state.provider_for("openrouter").name(), "openrouter");
    }

    #[test]
    fn dispatcher_defaults_unknown_identifiers_to_openai() {
        let state = test_state();
        assert_eq!(state.provider_for("anthropic").name(), "openai");
        assert_eq!(state.provider_for("").name(), "openai");
    }
}
