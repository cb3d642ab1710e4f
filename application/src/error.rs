use aura_domain::{DomainError, PipelineStage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("pipeline failed during {stage}: {source}")]
    Stage {
        stage: PipelineStage,
        #[source]
        source: DomainError,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn stage(stage: PipelineStage, source: DomainError) -> Self {
        ApplicationError::Stage { stage, source }
    }

    /// The stage a pipeline error was tagged with, if any.
    pub fn failed_stage(&self) -> Option<PipelineStage> {
        match self {
            ApplicationError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
