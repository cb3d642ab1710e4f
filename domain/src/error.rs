use thiserror::Error;

use crate::JobKind;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("submission rejected: {reason}")]
    Submission { reason: String },

    #[error("{kind} job failed: {reason}")]
    JobFailed { kind: JobKind, reason: String },

    #[error("{kind} job polling exceeded {waited_secs}s")]
    Timeout { kind: JobKind, waited_secs: u64 },

    #[error("generation failed: {reason}")]
    Generation { reason: String },

    #[error("{service} service error: {reason}")]
    ExternalService {
        service: &'static str,
        reason: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn submission(reason: impl Into<String>) -> Self {
        DomainError::Submission {
            reason: reason.into(),
        }
    }

    pub fn generation(reason: impl Into<String>) -> Self {
        DomainError::Generation {
            reason: reason.into(),
        }
    }

    pub fn external(service: &'static str, reason: impl Into<String>) -> Self {
        DomainError::ExternalService {
            service,
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        DomainError::Internal(reason.into())
    }
}
