use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use aura_application::{
    ChatUseCase, ChatUseCaseImpl, JobPoller, ProcessAudioRequest, ProcessAudioUseCase,
    ProcessAudioUseCaseImpl,
};
use aura_domain::{
    AudioAsset, ChatHistory, DomainError, GenerativePort, JobHandle, JobKind, JobOptions,
    JobResult, JobSnapshot, JobStatus, PipelineStage, PodcastStyle, PollDelay, RawUtterance,
    UploadReference,
};

const SUMMARY_TEXT: &str =
    "## Summary\nTwo people greet each other.\n## Trendy Content\n- [00:01 - 00:02] \"hi\"\n## Key Moments\n- [00:02] the reply";

struct InstantDelay;

#[async_trait]
impl PollDelay for InstantDelay {
    async fn wait(&self, _interval: Duration) {}
}

/// Speech service double: both jobs complete after one processing
/// poll, unless a kind is scripted to fail.
struct FakeSpeechService {
    uploads: AtomicUsize,
    failing_kind: Option<JobKind>,
}

impl FakeSpeechService {
    fn healthy() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            failing_kind: None,
        }
    }

    fn failing(kind: JobKind) -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            failing_kind: Some(kind),
        }
    }
}

#[async_trait]
impl aura_domain::SpeechServicePort for FakeSpeechService {
    async fn upload(&self, _asset: &AudioAsset) -> Result<UploadReference, DomainError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UploadReference("https://cdn.test/audio-1".to_string()))
    }

    async fn submit_job(
        &self,
        reference: &UploadReference,
        kind: JobKind,
        options: &JobOptions,
    ) -> Result<JobHandle, DomainError> {
        assert_eq!(reference.as_str(), "https://cdn.test/audio-1");
        match kind {
            JobKind::Transcription => assert!(options.language_detection),
            JobKind::Diarization => {
                assert!(options.speaker_labels);
                assert!(options.language_detection);
            }
        }
        Ok(JobHandle::new(format!("job-{kind}"), kind))
    }

    async fn job_status(&self, handle: &JobHandle) -> Result<JobSnapshot, DomainError> {
        if self.failing_kind == Some(handle.kind) {
            return Ok(JobSnapshot {
                status: JobStatus::Failed,
                result: None,
                error: Some("remote worker crashed".to_string()),
            });
        }
        let result = match handle.kind {
            JobKind::Transcription => JobResult::Transcript("hi hello".to_string()),
            JobKind::Diarization => JobResult::Utterances(vec![
                RawUtterance {
                    speaker: Some("A".to_string()),
                    start_ms: 1000,
                    end_ms: 2500,
                    text: Some("hi".to_string()),
                },
                RawUtterance {
                    speaker: None,
                    start_ms: 2500,
                    end_ms: 4000,
                    text: Some("hello".to_string()),
                },
            ]),
        };
        Ok(JobSnapshot {
            status: JobStatus::Completed,
            result: Some(result),
            error: None,
        })
    }
}

struct FakeGenerator {
    response: Option<&'static str>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    fn answering(response: &'static str) -> Self {
        Self {
            response: Some(response),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerativePort for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.response {
            Some(text) => Ok(text.to_string()),
            None => Err(DomainError::generation("model unavailable")),
        }
    }
}

fn usecase(
    speech: Arc<FakeSpeechService>,
    generator: Arc<FakeGenerator>,
) -> ProcessAudioUseCaseImpl {
    let poller = JobPoller::new(
        speech.clone(),
        Arc::new(InstantDelay),
        Duration::from_secs(5),
        Some(Duration::from_secs(60)),
    );
    ProcessAudioUseCaseImpl::new(speech, generator, None, poller)
}

fn request() -> ProcessAudioRequest {
    ProcessAudioRequest {
        filename: "episode.mp3".to_string(),
        bytes: vec![1, 2, 3, 4],
        style: PodcastStyle::General,
    }
}

#[tokio::test]
async fn successful_run_produces_a_complete_bundle() {
    let speech = Arc::new(FakeSpeechService::healthy());
    let generator = Arc::new(FakeGenerator::answering(SUMMARY_TEXT));
    let response = usecase(speech.clone(), generator)
        .process(request())
        .await
        .expect("pipeline succeeds");

    // One upload, reference reused for both submissions.
    assert_eq!(speech.uploads.load(Ordering::SeqCst), 1);

    assert_eq!(response.transcript_text, "hi hello");
    let lines: Vec<&str> = response
        .bundle
        .dialogue
        .iter()
        .map(|line| line.as_str())
        .collect();
    assert_eq!(
        lines,
        ["[A 00:01 - 00:02] hi", "[Unknown 00:02 - 00:04] hello"]
    );
    assert_eq!(response.bundle.summary.overview, "Two people greet each other.");
    assert_eq!(
        response.bundle.summary.trendy,
        "- [00:01 - 00:02] \"hi\""
    );
    assert_eq!(response.bundle.summary.key_moments, "- [00:02] the reply");
}

#[tokio::test]
async fn diarization_failure_aborts_with_the_diarizing_stage() {
    let speech = Arc::new(FakeSpeechService::failing(JobKind::Diarization));
    let generator = Arc::new(FakeGenerator::answering(SUMMARY_TEXT));
    let generator_probe = generator.clone();

    let error = usecase(speech, generator)
        .process(request())
        .await
        .expect_err("pipeline aborts");

    assert_eq!(error.failed_stage(), Some(PipelineStage::Diarizing));
    // No bundle means no summarization call either.
    assert_eq!(generator_probe.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transcription_failure_aborts_with_the_transcribing_stage() {
    let speech = Arc::new(FakeSpeechService::failing(JobKind::Transcription));
    let generator = Arc::new(FakeGenerator::answering(SUMMARY_TEXT));

    let error = usecase(speech, generator)
        .process(request())
        .await
        .expect_err("pipeline aborts");

    assert_eq!(error.failed_stage(), Some(PipelineStage::Transcribing));
}

#[tokio::test]
async fn generation_failure_aborts_with_the_summarizing_stage() {
    let speech = Arc::new(FakeSpeechService::healthy());
    let generator = Arc::new(FakeGenerator::failing());

    let error = usecase(speech, generator)
        .process(request())
        .await
        .expect_err("pipeline aborts");

    assert_eq!(error.failed_stage(), Some(PipelineStage::Summarizing));
}

#[tokio::test]
async fn empty_audio_is_rejected_before_any_upload() {
    let speech = Arc::new(FakeSpeechService::healthy());
    let generator = Arc::new(FakeGenerator::answering(SUMMARY_TEXT));

    let mut empty = request();
    empty.bytes.clear();
    let error = usecase(speech.clone(), generator)
        .process(empty)
        .await
        .expect_err("validation fails");

    assert!(matches!(error, aura_application::ApplicationError::Validation(_)));
    assert_eq!(speech.uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_ordinals_are_contiguous_and_reset_starts_over() {
    let speech = Arc::new(FakeSpeechService::healthy());
    let generator = Arc::new(FakeGenerator::answering(SUMMARY_TEXT));
    let response = usecase(speech, generator.clone())
        .process(request())
        .await
        .expect("pipeline succeeds");

    let chat = ChatUseCaseImpl::new(generator);
    let mut history = ChatHistory::new();
    for expected in 0..3usize {
        let turn = chat
            .ask(
                &response.bundle,
                &mut history,
                "what was said?",
                PodcastStyle::General,
            )
            .await
            .expect("chat succeeds");
        assert_eq!(turn.ordinal, expected);
    }
    assert_eq!(history.len(), 3);

    chat.reset(&mut history);
    assert!(history.is_empty());

    let turn = chat
        .ask(
            &response.bundle,
            &mut history,
            "and afterwards?",
            PodcastStyle::General,
        )
        .await
        .expect("chat succeeds");
    assert_eq!(turn.ordinal, 0);
}
