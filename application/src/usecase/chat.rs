use std::sync::Arc;

use async_trait::async_trait;

use aura_domain::{ArtifactBundle, ChatHistory, ChatTurn, GenerativePort, PodcastStyle};

use crate::{prompt::build_chat_prompt, ApplicationError};

#[async_trait]
pub trait ChatUseCase: Send + Sync {
    /// Answers one follow-up question grounded on the bundle and
    /// appends the turn with the next ordinal. The caller serializes
    /// access to one history (one ask in flight per session).
    async fn ask(
        &self,
        bundle: &ArtifactBundle,
        history: &mut ChatHistory,
        question: &str,
        style: PodcastStyle,
    ) -> Result<ChatTurn, ApplicationError>;

    fn reset(&self, history: &mut ChatHistory);
}

pub struct ChatUseCaseImpl {
    generator: Arc<dyn GenerativePort>,
}

impl ChatUseCaseImpl {
    pub fn new(generator: Arc<dyn GenerativePort>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ChatUseCase for ChatUseCaseImpl {
    async fn ask(
        &self,
        bundle: &ArtifactBundle,
        history: &mut ChatHistory,
        question: &str,
        style: PodcastStyle,
    ) -> Result<ChatTurn, ApplicationError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApplicationError::Validation(
                "question cannot be empty".to_string(),
            ));
        }

        // Ground on the complete record: full dialogue plus the raw
        // summary text, not the extracted views.
        let prompt = build_chat_prompt(
            &bundle.dialogue_text(),
            &bundle.summary.raw_text,
            question,
            style,
        );
        let answer = self.generator.generate(&prompt).await?;

        let turn = history.append(question, answer).clone();
        tracing::debug!(ordinal = turn.ordinal, "chat turn appended");
        Ok(turn)
    }

    fn reset(&self, history: &mut ChatHistory) {
        history.reset();
    }
}
