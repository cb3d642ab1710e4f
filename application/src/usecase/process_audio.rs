use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use aura_domain::{
    align, extract, render_dialogue, ArtifactBundle, ArtifactSinkPort, AudioAsset, DialogueLine,
    DomainError, GenerativePort, JobKind, JobOptions, JobResult, PipelineStage, SpeechServicePort,
};

use crate::{
    prompt::build_summary_prompt, ApplicationError, JobPoller, ProcessAudioRequest,
    ProcessAudioResponse,
};

#[async_trait]
pub trait ProcessAudioUseCase: Send + Sync {
    async fn process(
        &self,
        request: ProcessAudioRequest,
    ) -> Result<ProcessAudioResponse, ApplicationError>;
}

/// End-to-end pipeline run: Uploading → Transcribing/Diarizing →
/// Aligning → Summarizing → Complete. The asset is uploaded once and
/// its reference reused for both job submissions; the two pollers run
/// concurrently over disjoint handles. First failure aborts the run
/// with a stage-tagged error and no bundle is materialized.
pub struct ProcessAudioUseCaseImpl {
    speech: Arc<dyn SpeechServicePort>,
    generator: Arc<dyn GenerativePort>,
    sink: Option<Arc<dyn ArtifactSinkPort>>,
    poller: JobPoller,
}

impl ProcessAudioUseCaseImpl {
    pub fn new(
        speech: Arc<dyn SpeechServicePort>,
        generator: Arc<dyn GenerativePort>,
        sink: Option<Arc<dyn ArtifactSinkPort>>,
        poller: JobPoller,
    ) -> Self {
        Self {
            speech,
            generator,
            sink,
            poller,
        }
    }
}

#[async_trait]
impl ProcessAudioUseCase for ProcessAudioUseCaseImpl {
    async fn process(
        &self,
        request: ProcessAudioRequest,
    ) -> Result<ProcessAudioResponse, ApplicationError> {
        if request.bytes.is_empty() {
            return Err(ApplicationError::Validation(
                "audio payload is empty".to_string(),
            ));
        }
        if request.filename.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "filename is required".to_string(),
            ));
        }

        let session_id = Uuid::new_v4();
        let asset = AudioAsset::new(request.bytes, request.filename);
        tracing::info!(
            session_id = %session_id,
            filename = %asset.filename,
            byte_count = asset.bytes.len(),
            style = request.style.label(),
            "starting pipeline run"
        );

        let reference = self
            .speech
            .upload(&asset)
            .await
            .map_err(tag(PipelineStage::Uploading))?;
        tracing::info!(session_id = %session_id, "audio uploaded");

        let transcription_handle = self
            .speech
            .submit_job(
                &reference,
                JobKind::Transcription,
                &JobOptions::for_kind(JobKind::Transcription),
            )
            .await
            .map_err(tag(PipelineStage::Transcribing))?;
        let diarization_handle = self
            .speech
            .submit_job(
                &reference,
                JobKind::Diarization,
                &JobOptions::for_kind(JobKind::Diarization),
            )
            .await
            .map_err(tag(PipelineStage::Diarizing))?;
        tracing::info!(
            session_id = %session_id,
            transcription_job = %transcription_handle.job_id,
            diarization_job = %diarization_handle.job_id,
            "jobs submitted"
        );

        // The two jobs touch disjoint handles and result slots, so they
        // poll concurrently. Whichever fails first tags the error.
        let (transcription_result, diarization_result) = tokio::try_join!(
            async {
                self.poller
                    .await_completion(&transcription_handle)
                    .await
                    .map_err(tag(PipelineStage::Transcribing))
            },
            async {
                self.poller
                    .await_completion(&diarization_handle)
                    .await
                    .map_err(tag(PipelineStage::Diarizing))
            },
        )?;

        let transcript_text = match transcription_result {
            JobResult::Transcript(text) => text,
            JobResult::Utterances(_) => {
                return Err(ApplicationError::stage(
                    PipelineStage::Transcribing,
                    DomainError::internal("transcription job returned an utterance payload"),
                ));
            }
        };
        let raw_utterances = match diarization_result {
            JobResult::Utterances(utterances) => utterances,
            JobResult::Transcript(_) => {
                return Err(ApplicationError::stage(
                    PipelineStage::Diarizing,
                    DomainError::internal("diarization job returned a transcript payload"),
                ));
            }
        };

        let utterances = align(raw_utterances);
        let dialogue: Vec<DialogueLine> = render_dialogue(&utterances);
        tracing::info!(
            session_id = %session_id,
            utterance_count = dialogue.len(),
            "dialogue aligned"
        );

        let dialogue_text = dialogue
            .iter()
            .map(DialogueLine::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = build_summary_prompt(&dialogue_text, request.style);
        let raw_summary = self
            .generator
            .generate(&prompt)
            .await
            .map_err(tag(PipelineStage::Summarizing))?;
        let summary = extract(&raw_summary);
        let bundle = ArtifactBundle::new(dialogue, summary);
        tracing::info!(session_id = %session_id, "pipeline run complete");

        // Persistence is a best-effort sink; a write failure never
        // invalidates the bundle already produced.
        if let Some(sink) = &self.sink {
            if let Err(error) = sink
                .persist(&session_id.to_string(), &bundle, &asset)
                .await
            {
                tracing::warn!(session_id = %session_id, error = %error, "artifact persistence failed");
            }
        }

        Ok(ProcessAudioResponse {
            session_id,
            transcript_text,
            bundle,
        })
    }
}

fn tag(stage: PipelineStage) -> impl FnOnce(DomainError) -> ApplicationError {
    move |source| ApplicationError::stage(stage, source)
}
