use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use aura_application::ApplicationError;

#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            HttpError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            HttpError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            HttpError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(json!({
                "error": message,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    match &error {
        ApplicationError::Validation(_) => HttpError::Validation {
            message: error.to_string(),
        },
        ApplicationError::NotFound(_) => HttpError::NotFound {
            message: error.to_string(),
        },
        // Stage-tagged and raw domain errors come from collaborating
        // services and read as upstream failures to the caller.
        ApplicationError::Stage { .. } | ApplicationError::Domain(_) => HttpError::Upstream {
            message: error.to_string(),
        },
        ApplicationError::Internal(_) => HttpError::Internal {
            message: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use aura_domain::{DomainError, JobKind, PipelineStage};

    use super::*;

    #[test]
    fn stage_errors_read_as_upstream_and_name_the_stage() {
        let error = ApplicationError::stage(
            PipelineStage::Diarizing,
            DomainError::JobFailed {
                kind: JobKind::Diarization,
                reason: "worker crashed".to_string(),
            },
        );
        match error_mapper(error) {
            HttpError::Upstream { message } => {
                assert!(message.contains("Diarizing"), "got: {message}");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn validation_and_not_found_keep_their_statuses() {
        assert!(matches!(
            error_mapper(ApplicationError::Validation("bad".into())),
            HttpError::Validation { .. }
        ));
        assert!(matches!(
            error_mapper(ApplicationError::NotFound("session x".into())),
            HttpError::NotFound { .. }
        ));
    }
}
