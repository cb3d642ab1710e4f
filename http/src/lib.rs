use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use aura_application::{ChatUseCase, ProcessAudioUseCase, SessionStore};
use aura_configuration::ServerConfig;

pub mod error;
pub mod handlers;

pub use error::{error_mapper, HttpError};
pub use handlers::*;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<dyn ProcessAudioUseCase>,
    pub chat: Arc<dyn ChatUseCase>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<dyn ProcessAudioUseCase>,
        chat: Arc<dyn ChatUseCase>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            pipeline,
            chat,
            sessions,
        }
    }
}

pub fn create_app_routes(state: AppState, config: &ServerConfig) -> Router {
    // Raw audio bodies are large; raise the limit on the process route.
    let process_route = post(process_audio).layer(DefaultBodyLimit::max(config.max_body_bytes));

    Router::new()
        .route("/health", get(health))
        .route("/api/audio/process", process_route)
        .route("/api/session/{id}", get(get_session).delete(delete_session))
        .route("/api/session/{id}/chat", post(chat))
        .route("/api/session/{id}/chat/reset", post(reset_chat))
        .with_state(state)
}

pub async fn serve(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_app_routes(state, config);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "http server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install shutdown handler");
    }
}
