use aura_domain::{ArtifactBundle, PodcastStyle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recording to run through the pipeline.
#[derive(Debug, Clone)]
pub struct ProcessAudioRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub style: PodcastStyle,
}

/// Complete outcome of one successful run. The transcript text comes
/// from the transcription job and is carried for display; alignment
/// consumes the diarization result only.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessAudioResponse {
    pub session_id: Uuid,
    pub transcript_text: String,
    pub bundle: ArtifactBundle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}
