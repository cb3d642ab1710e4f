use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use aura_domain::{DomainError, JobHandle, JobResult, JobStatus, PollDelay, SpeechServicePort};

/// Real suspension between polls.
pub struct TokioDelay;

#[async_trait]
impl PollDelay for TokioDelay {
    async fn wait(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Drives one submitted job to a terminal state by fixed-interval
/// status polling. Intermediate states are never surfaced to callers;
/// `max_wait` bounds the accumulated wait without cancelling the
/// remote job, whose lifecycle belongs to the speech service.
#[derive(Clone)]
pub struct JobPoller {
    speech: Arc<dyn SpeechServicePort>,
    delay: Arc<dyn PollDelay>,
    interval: Duration,
    max_wait: Option<Duration>,
}

impl JobPoller {
    pub fn new(
        speech: Arc<dyn SpeechServicePort>,
        delay: Arc<dyn PollDelay>,
        interval: Duration,
        max_wait: Option<Duration>,
    ) -> Self {
        Self {
            speech,
            delay,
            interval,
            max_wait,
        }
    }

    pub async fn await_completion(&self, handle: &JobHandle) -> Result<JobResult, DomainError> {
        let mut waited = Duration::ZERO;
        loop {
            let snapshot = self.speech.job_status(handle).await?;
            match snapshot.status {
                JobStatus::Completed => {
                    tracing::debug!(
                        job_id = %handle.job_id,
                        kind = %handle.kind,
                        waited_secs = waited.as_secs(),
                        "job completed"
                    );
                    return snapshot.result.ok_or_else(|| {
                        DomainError::internal(format!(
                            "{} job completed without a result payload",
                            handle.kind
                        ))
                    });
                }
                JobStatus::Failed => {
                    let reason = snapshot
                        .error
                        .unwrap_or_else(|| "no reason reported".to_string());
                    tracing::warn!(job_id = %handle.job_id, kind = %handle.kind, reason, "job failed");
                    return Err(DomainError::JobFailed {
                        kind: handle.kind,
                        reason,
                    });
                }
                JobStatus::Queued | JobStatus::Processing => {
                    if let Some(max_wait) = self.max_wait {
                        if waited + self.interval > max_wait {
                            return Err(DomainError::Timeout {
                                kind: handle.kind,
                                waited_secs: waited.as_secs(),
                            });
                        }
                    }
                    self.delay.wait(self.interval).await;
                    waited += self.interval;
                }
            }
        }
    }
}
