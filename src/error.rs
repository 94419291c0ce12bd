//! Error kinds shared by the recommendation and forecast pipelines.
//!
//! `AdvisorError` aborts a request; `ModelError` is what the model collaborators return and is
//! either promoted to `ModelInferenceFailure` (classifier) or absorbed by the yield estimator.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Geolocation or forecast HTTP failure (transport error or non-success status).
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
    },

    /// Provider answered, but with an unexpected shape or timestamp.
    #[error("malformed provider data: {0}")]
    MalformedProviderData(String),

    /// The crop classifier failed; fatal for the whole recommendation.
    #[error("crop model inference failed: {0}")]
    ModelInferenceFailure(#[source] ModelError),

    #[error("classifier exposes {available} distinct crop classes, at least 3 are required")]
    InsufficientCandidates { available: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;

impl AdvisorError {
    pub fn provider(provider: &'static str, reason: impl ToString) -> Self {
        Self::ProviderUnavailable {
            provider,
            reason: reason.to_string(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedProviderData(detail.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::ProviderUnavailable { .. } | Self::MalformedProviderData(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::ModelInferenceFailure(_) | Self::InsufficientCandidates { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Failures raised by the classifier, encoder or yield regressor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("unknown {field} category '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("model produced a non-finite value")]
    NonFinite,

    #[error("{0}")]
    Inference(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request aborted");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AdvisorError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AdvisorError::provider("ipinfo", "timeout").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AdvisorError::malformed("bad time").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AdvisorError::InsufficientCandidates { available: 2 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn provider_message_names_the_provider() {
        let e = AdvisorError::provider("weatherapi", "status 401");
        assert_eq!(e.to_string(), "weatherapi unavailable: status 401");
    }
}
