use std::time::Duration;

use async_trait::async_trait;

use crate::{
    ArtifactBundle, AudioAsset, DomainError, JobHandle, JobKind, JobStatus, RawUtterance,
    UploadReference,
};

/// Submission options recognized by the speech service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOptions {
    pub language_detection: bool,
    pub speaker_labels: bool,
}

impl JobOptions {
    /// Transcription detects language; diarization additionally asks
    /// for speaker labels.
    pub fn for_kind(kind: JobKind) -> Self {
        match kind {
            JobKind::Transcription => Self {
                language_detection: true,
                speaker_labels: false,
            },
            JobKind::Diarization => Self {
                language_detection: true,
                speaker_labels: true,
            },
        }
    }
}

/// Result payload of a completed job, shaped by the job kind.
#[derive(Debug, Clone, PartialEq)]
pub enum JobResult {
    Transcript(String),
    Utterances(Vec<RawUtterance>),
}

/// One observation of a remote job. A result payload is only ever
/// present alongside `Completed`.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub result: Option<JobResult>,
    pub error: Option<String>,
}

#[async_trait]
pub trait SpeechServicePort: Send + Sync {
    async fn upload(&self, asset: &AudioAsset) -> Result<UploadReference, DomainError>;

    async fn submit_job(
        &self,
        reference: &UploadReference,
        kind: JobKind,
        options: &JobOptions,
    ) -> Result<JobHandle, DomainError>;

    async fn job_status(&self, handle: &JobHandle) -> Result<JobSnapshot, DomainError>;
}

#[async_trait]
pub trait GenerativePort: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Write-only sink for a finished run. Never read back by the core.
#[async_trait]
pub trait ArtifactSinkPort: Send + Sync {
    async fn persist(
        &self,
        session_id: &str,
        bundle: &ArtifactBundle,
        asset: &AudioAsset,
    ) -> Result<(), DomainError>;
}

/// Suspension point between polls, injectable so tests simulate time.
#[async_trait]
pub trait PollDelay: Send + Sync {
    async fn wait(&self, interval: Duration);
}
