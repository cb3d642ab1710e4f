use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use aura_configuration::SpeechServiceConfig;
use aura_domain::{
    AudioAsset, DomainError, JobHandle, JobKind, JobOptions, JobResult, JobSnapshot, JobStatus,
    RawUtterance, SpeechServicePort, UploadReference,
};

const SERVICE: &str = "speech";
const AUTH_HEADER: &str = "authorization";

/// Adapter for an AssemblyAI-shaped speech REST API: one upload
/// endpoint returning a content-addressable URL, one submission
/// endpoint per job, and a status endpoint polled by job id.
pub struct AssemblyAiSpeechService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AssemblyAiSpeechService {
    pub fn new(config: &SpeechServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl SpeechServicePort for AssemblyAiSpeechService {
    async fn upload(&self, asset: &AudioAsset) -> Result<UploadReference, DomainError> {
        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .header(AUTH_HEADER, &self.api_key)
            .body(asset.bytes.clone())
            .send()
            .await
            .map_err(|err| DomainError::submission(format!("upload transport failure: {err}")))?;
        let response = rejected_to_submission(response).await?;
        let payload: UploadResponse = response
            .json()
            .await
            .map_err(|err| DomainError::submission(format!("malformed upload response: {err}")))?;
        Ok(UploadReference(payload.upload_url))
    }

    async fn submit_job(
        &self,
        reference: &UploadReference,
        kind: JobKind,
        options: &JobOptions,
    ) -> Result<JobHandle, DomainError> {
        let body = SubmitJobBody {
            audio_url: reference.as_str(),
            language_detection: options.language_detection,
            speaker_labels: options.speaker_labels,
        };
        let response = self
            .http
            .post(format!("{}/transcript", self.base_url))
            .header(AUTH_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                DomainError::submission(format!("{kind} submission transport failure: {err}"))
            })?;
        let response = rejected_to_submission(response).await?;
        let payload: SubmitJobResponse = response.json().await.map_err(|err| {
            DomainError::submission(format!("malformed {kind} submission response: {err}"))
        })?;
        tracing::debug!(job_id = %payload.id, %kind, "job submitted");
        Ok(JobHandle::new(payload.id, kind))
    }

    async fn job_status(&self, handle: &JobHandle) -> Result<JobSnapshot, DomainError> {
        let response = self
            .http
            .get(format!("{}/transcript/{}", self.base_url, handle.job_id))
            .header(AUTH_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|err| DomainError::external(SERVICE, format!("status fetch failed: {err}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external(
                SERVICE,
                format!("status fetch returned {status}: {body}"),
            ));
        }
        let payload: TranscriptPayload = response.json().await.map_err(|err| {
            DomainError::external(SERVICE, format!("malformed status response: {err}"))
        })?;
        Ok(map_snapshot(handle.kind, payload))
    }
}

async fn rejected_to_submission(response: reqwest::Response) -> Result<reqwest::Response, DomainError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(DomainError::submission(format!(
        "payload rejected with {status}: {body}"
    )))
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Serialize)]
struct SubmitJobBody<'a> {
    audio_url: &'a str,
    language_detection: bool,
    speaker_labels: bool,
}

#[derive(Debug, Deserialize)]
struct SubmitJobResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptPayload {
    status: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    utterances: Option<Vec<WireUtterance>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUtterance {
    #[serde(default)]
    speaker: Option<String>,
    start: u64,
    end: u64,
    #[serde(default)]
    text: Option<String>,
}

/// Maps one wire status payload to a job snapshot. A result payload is
/// attached only for `completed`; unrecognized status strings are
/// treated as still in flight.
fn map_snapshot(kind: JobKind, payload: TranscriptPayload) -> JobSnapshot {
    match payload.status.as_str() {
        "completed" => {
            let result = match kind {
                JobKind::Transcription => {
                    JobResult::Transcript(payload.text.unwrap_or_default())
                }
                JobKind::Diarization => JobResult::Utterances(
                    payload
                        .utterances
                        .unwrap_or_default()
                        .into_iter()
                        .map(|utterance| RawUtterance {
                            speaker: utterance.speaker,
                            start_ms: utterance.start,
                            end_ms: utterance.end,
                            text: utterance.text,
                        })
                        .collect(),
                ),
            };
            JobSnapshot {
                status: JobStatus::Completed,
                result: Some(result),
                error: None,
            }
        }
        "error" | "failed" => JobSnapshot {
            status: JobStatus::Failed,
            result: None,
            error: payload.error,
        },
        "queued" => JobSnapshot {
            status: JobStatus::Queued,
            result: None,
            error: None,
        },
        "processing" => JobSnapshot {
            status: JobStatus::Processing,
            result: None,
            error: None,
        },
        other => {
            tracing::warn!(status = other, %kind, "unrecognized job status, treating as in flight");
            JobSnapshot {
                status: JobStatus::Processing,
                result: None,
                error: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> TranscriptPayload {
        serde_json::from_str(json).expect("payload parses")
    }

    #[test]
    fn completed_transcription_carries_the_text() {
        let snapshot = map_snapshot(
            JobKind::Transcription,
            payload(r#"{"status":"completed","text":"hello there"}"#),
        );
        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(
            snapshot.result,
            Some(JobResult::Transcript("hello there".to_string()))
        );
    }

    #[test]
    fn completed_diarization_carries_ms_offset_utterances() {
        let snapshot = map_snapshot(
            JobKind::Diarization,
            payload(
                r#"{"status":"completed","utterances":[{"speaker":"A","start":1000,"end":2500,"text":"hi"},{"start":2500,"end":3000}]}"#,
            ),
        );
        match snapshot.result {
            Some(JobResult::Utterances(utterances)) => {
                assert_eq!(utterances.len(), 2);
                assert_eq!(utterances[0].speaker.as_deref(), Some("A"));
                assert_eq!(utterances[0].start_ms, 1000);
                assert_eq!(utterances[0].end_ms, 2500);
                assert_eq!(utterances[1].speaker, None);
                assert_eq!(utterances[1].text, None);
            }
            other => panic!("expected utterances, got {other:?}"),
        }
    }

    #[test]
    fn error_status_maps_to_failed_with_reason() {
        let snapshot = map_snapshot(
            JobKind::Transcription,
            payload(r#"{"status":"error","error":"file truncated"}"#),
        );
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert!(snapshot.result.is_none());
        assert_eq!(snapshot.error.as_deref(), Some("file truncated"));
    }

    #[test]
    fn queued_and_processing_are_non_terminal_without_payload() {
        for raw in [r#"{"status":"queued"}"#, r#"{"status":"processing"}"#] {
            let snapshot = map_snapshot(JobKind::Diarization, payload(raw));
            assert!(!snapshot.status.is_terminal());
            assert!(snapshot.result.is_none());
        }
    }

    #[test]
    fn unrecognized_status_stays_in_flight() {
        let snapshot = map_snapshot(JobKind::Transcription, payload(r#"{"status":"throttled"}"#));
        assert_eq!(snapshot.status, JobStatus::Processing);
    }

    #[test]
    fn submission_body_serializes_recognized_option_keys() {
        let body = SubmitJobBody {
            audio_url: "https://cdn.test/a",
            language_detection: true,
            speaker_labels: true,
        };
        let json = serde_json::to_value(&body).expect("body serializes");
        assert_eq!(json["audio_url"], "https://cdn.test/a");
        assert_eq!(json["language_detection"], true);
        assert_eq!(json["speaker_labels"], true);
    }
}
