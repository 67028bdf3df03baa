//! Public HTTP DTOs (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::config::ActiveConfig;

/// Body accepted by `POST /admin/config` — exactly the three persisted fields.
#[derive(Debug, Deserialize)]
pub struct ConfigUpdateIn {
    pub provider: String,
    pub model: String,
    pub prompt_template: String,
}

/// Response of `GET /admin/config`.
#[derive(Debug, Serialize)]
pub struct ConfigOut {
    pub provider: String,
    pub model: String,
    pub prompt_template: String,
}

impl From<ActiveConfig> for ConfigOut {
    fn from(c: ActiveConfig) -> Self {
        ConfigOut {
            provider: c.provider,
            model: c.model,
            prompt_template: c.prompt_template,
        }
    }
}

/// Acknowledgment for administrative updates.
#[derive(Serialize)]
pub struct ConfigAck {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub model: String,
    pub provider: String,
}
