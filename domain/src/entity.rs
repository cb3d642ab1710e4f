use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded recording. Immutable once accepted; owned by a single
/// pipeline run.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub extension: String,
}

impl AudioAsset {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        Self {
            bytes,
            filename,
            extension,
        }
    }
}

/// Opaque content-addressable reference returned by the speech service
/// upload endpoint. Obtained once per run and reused for every job
/// submission against the same recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReference(pub String);

impl UploadReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    Transcription,
    Diarization,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Transcription => write!(f, "transcription"),
            JobKind::Diarization => write!(f, "diarization"),
        }
    }
}

/// Handle for one asynchronous job at the speech service. Created by
/// submission, consumed by the poller, discarded at terminal state.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub job_id: String,
    pub kind: JobKind,
    pub submitted_at: SystemTime,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>, kind: JobKind) -> Self {
        Self {
            job_id: job_id.into(),
            kind,
            submitted_at: SystemTime::now(),
        }
    }
}

/// Remote job state. Completed and Failed are terminal; a job never
/// transitions back out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Diarization segment as reported by the speech service, offsets in
/// milliseconds. Speaker and text may be absent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUtterance {
    pub speaker: Option<String>,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: Option<String>,
}

/// Speaker-attributed, time-ranged utterance with offsets in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker_label: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}

/// Rendered `[<speaker> <mm:ss> - <mm:ss>] <text>` line. Derived from
/// an [`Utterance`], never independently mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueLine(pub String);

impl DialogueLine {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialogueLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generated summary with its three section views. The derived fields
/// are recomputed from `raw_text` by extraction and are always
/// byte-identical on re-extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub raw_text: String,
    pub overview: String,
    pub trendy: String,
    pub key_moments: String,
}

/// Complete output of one successful pipeline run. Immutable; the sole
/// input to follow-up chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub dialogue: Vec<DialogueLine>,
    pub summary: SummaryDocument,
    pub created_at_epoch_secs: u64,
}

impl ArtifactBundle {
    pub fn new(dialogue: Vec<DialogueLine>, summary: SummaryDocument) -> Self {
        let created_at_epoch_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self {
            dialogue,
            summary,
            created_at_epoch_secs,
        }
    }

    /// Full rendered dialogue, one line per utterance.
    pub fn dialogue_text(&self) -> String {
        self.dialogue
            .iter()
            .map(DialogueLine::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One question/answer exchange. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub ordinal: usize,
}

/// Append-only chat history scoped to one bundle. Ordinals are
/// contiguous from 0 by construction; only reset empties the history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) -> &ChatTurn {
        let ordinal = self.turns.len();
        self.turns.push(ChatTurn {
            question: question.into(),
            answer: answer.into(),
            ordinal,
        });
        &self.turns[ordinal]
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Requested summarization/chat register, recovered from the recording
/// genre. Unknown labels fall back to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodcastStyle {
    General,
    News,
    Sports,
    Comedy,
    Technology,
    Business,
    Education,
    TrueCrime,
}

impl Default for PodcastStyle {
    fn default() -> Self {
        PodcastStyle::General
    }
}

impl PodcastStyle {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "news" => PodcastStyle::News,
            "sports" => PodcastStyle::Sports,
            "comedy" => PodcastStyle::Comedy,
            "technology" | "tech" => PodcastStyle::Technology,
            "business" => PodcastStyle::Business,
            "education" => PodcastStyle::Education,
            "true crime" | "true-crime" | "truecrime" => PodcastStyle::TrueCrime,
            _ => PodcastStyle::General,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PodcastStyle::General => "General",
            PodcastStyle::News => "News",
            PodcastStyle::Sports => "Sports",
            PodcastStyle::Comedy => "Comedy",
            PodcastStyle::Technology => "Technology",
            PodcastStyle::Business => "Business",
            PodcastStyle::Education => "Education",
            PodcastStyle::TrueCrime => "True Crime",
        }
    }
}

/// Pipeline stage names, used for state reporting and stage-tagged
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Uploading,
    Transcribing,
    Diarizing,
    Aligning,
    Summarizing,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Uploading => "Uploading",
            PipelineStage::Transcribing => "Transcribing",
            PipelineStage::Diarizing => "Diarizing",
            PipelineStage::Aligning => "Aligning",
            PipelineStage::Summarizing => "Summarizing",
        };
        f.write_str(name)
    }
}

/// Session value owning one bundle and its chat history. Created when
/// a pipeline run completes, destroyed or reset on explicit action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub style: PodcastStyle,
    pub transcript_text: String,
    pub bundle: ArtifactBundle,
    pub history: ChatHistory,
}

impl Session {
    pub fn new(style: PodcastStyle, transcript_text: String, bundle: ArtifactBundle) -> Self {
        Self::with_id(Uuid::new_v4(), style, transcript_text, bundle)
    }

    pub fn with_id(
        id: Uuid,
        style: PodcastStyle,
        transcript_text: String,
        bundle: ArtifactBundle,
    ) -> Self {
        Self {
            id,
            style,
            transcript_text,
            bundle,
            history: ChatHistory::new(),
        }
    }
}
