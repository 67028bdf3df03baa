//! Request-terminal error taxonomy and its HTTP mapping.
//!
//! Every failure in the generation pipeline is terminal to its request: there
//! is no local recovery, partial result, or fallback provider. Each variant
//! carries a human-readable detail (user-facing, Spanish like the rest of the
//! product) and maps to a fixed status class so operators can tell failure
//! modes apart from the response alone.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required credential absent from the environment. Checked before any
    /// network call.
    #[error("No hay clave {0} en el entorno.")]
    ConfigurationMissing(&'static str),

    /// The provider's HTTP client could not be initialized in this
    /// environment. Also checked before any network call.
    #[error("El cliente del proveedor no está disponible: {0}")]
    DependencyMissing(String),

    /// The remote call completed with a non-success status, or never
    /// completed (timeout, DNS). `status` is the upstream's own status when
    /// there was one; `detail` carries the raw upstream body for diagnostics.
    #[error("{provider}: {detail}")]
    Transport {
        provider: &'static str,
        status: Option<u16>,
        detail: String,
    },

    /// None of the known envelope keys yielded text. A provider contract
    /// change; must surface loudly rather than be retried.
    #[error("El proveedor no devolvió texto válido")]
    Extraction,

    /// The extracted text is not a JSON array of questions. Distinct from
    /// `Extraction` so "provider gave us nothing usable" and "provider gave
    /// us non-JSON prose" are distinguishable.
    #[error("Respuesta de IA no tiene JSON válido: {0}")]
    Parse(String),

    /// Malformed inbound request, rejected before any provider call.
    #[error("Petición inválida: {0}")]
    Validation(String),

    /// Configuration file could not be persisted.
    #[error("No se pudo persistir la configuración: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ConfigurationMissing(_) => StatusCode::PRECONDITION_FAILED,
            ApiError::DependencyMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Transport { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Extraction | ApiError::Parse(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody { detail: self.to_string() };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert_eq!(
            ApiError::ConfigurationMissing("OPENAI_API_KEY").status_code(),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            ApiError::DependencyMissing("sin cliente".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Extraction.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Parse("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn transport_prefers_upstream_status() {
        let e = ApiError::Transport { provider: "openrouter", status: Some(429), detail: "rate".into() };
        assert_eq!(e.status_code(), StatusCode::TOO_MANY_REQUESTS);
        let e = ApiError::Transport { provider: "openrouter", status: None, detail: "timeout".into() };
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn extraction_and_parse_have_distinct_details() {
        let a = ApiError::Extraction.to_string();
        let b = ApiError::Parse("expected value".into()).to_string();
        assert_ne!(a, b);
        assert!(b.contains("JSON"));
    }
}
