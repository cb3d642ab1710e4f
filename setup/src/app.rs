use std::{sync::Arc, time::Duration};

use anyhow::{bail, Error};

use aura_application::{
    ChatUseCase, ChatUseCaseImpl, JobPoller, ProcessAudioUseCase, ProcessAudioUseCaseImpl,
    SessionStore, TokioDelay,
};
use aura_configuration::AppConfig;
use aura_domain::{ArtifactSinkPort, GenerativePort, SpeechServicePort};
use aura_http::{serve, AppState};
use aura_infra_genai::GeminiGenerativeService;
use aura_infra_speech::AssemblyAiSpeechService;
use aura_infra_store::FilesystemArtifactSink;

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let app = Application::new(config)?;
    app.run().await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        if config.speech.poll_interval_secs == 0 {
            bail!("speech.poll_interval_secs must be at least 1");
        }
        if config.speech.api_key.is_empty() {
            tracing::warn!("speech.api_key is empty; speech submissions will be rejected");
        }
        if config.generation.api_key.is_empty() {
            tracing::warn!("generation.api_key is empty; generation calls will be rejected");
        }

        let speech: Arc<dyn SpeechServicePort> =
            Arc::new(AssemblyAiSpeechService::new(&config.speech));
        let generator: Arc<dyn GenerativePort> =
            Arc::new(GeminiGenerativeService::new(&config.generation));
        let sink: Option<Arc<dyn ArtifactSinkPort>> = if config.storage.enabled {
            Some(Arc::new(FilesystemArtifactSink::new(&config.storage)))
        } else {
            None
        };

        let poller = JobPoller::new(
            speech.clone(),
            Arc::new(TokioDelay),
            Duration::from_secs(config.speech.poll_interval_secs),
            config.speech.max_wait_secs.map(Duration::from_secs),
        );
        let pipeline: Arc<dyn ProcessAudioUseCase> = Arc::new(ProcessAudioUseCaseImpl::new(
            speech,
            generator.clone(),
            sink,
            poller,
        ));
        let chat: Arc<dyn ChatUseCase> = Arc::new(ChatUseCaseImpl::new(generator));
        let state = AppState::new(pipeline, chat, Arc::new(SessionStore::new()));

        Ok(Self { config, state })
    }

    pub async fn run(self) -> Result<(), Error> {
        serve(self.state, &self.config.server).await
    }
}
