use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use aura_application::{AskRequest, ProcessAudioRequest, ProcessAudioResponse};
use aura_domain::{ChatTurn, PodcastStyle, Session};

use crate::error::{error_mapper, HttpError};
use crate::AppState;

pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Deserialize)]
pub struct ProcessQuery {
    pub filename: String,
    #[serde(default)]
    pub style: Option<String>,
}

pub async fn process_audio(
    State(state): State<AppState>,
    Query(query): Query<ProcessQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<ProcessAudioResponse>), HttpError> {
    let style = query
        .style
        .as_deref()
        .map(PodcastStyle::from_label)
        .unwrap_or_default();
    tracing::info!(
        filename = %query.filename,
        byte_count = body.len(),
        style = style.label(),
        "received process request"
    );

    let request = ProcessAudioRequest {
        filename: query.filename,
        bytes: body.to_vec(),
        style,
    };
    let response = state.pipeline.process(request).await.map_err(|error| {
        tracing::error!(error = %error, "process request failed");
        error_mapper(error)
    })?;

    let session = Session::with_id(
        response.session_id,
        style,
        response.transcript_text.clone(),
        response.bundle.clone(),
    );
    state.sessions.insert(session).await;
    tracing::info!(session_id = %response.session_id, "process request completed");
    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, HttpError> {
    let session = state.sessions.get(id).await.map_err(error_mapper)?;
    let snapshot = session.lock().await.clone();
    Ok(Json(snapshot))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::NotFound {
            message: format!("session {id}"),
        })
    }
}

pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ChatTurn>, HttpError> {
    let session = state.sessions.get(id).await.map_err(error_mapper)?;
    // Holding the session lock across the ask keeps turns serialized
    // and ordinals contiguous for this history.
    let mut session = session.lock().await;
    let Session {
        bundle,
        history,
        style,
        ..
    } = &mut *session;
    let turn = state
        .chat
        .ask(bundle, history, &request.question, *style)
        .await
        .map_err(|error| {
            tracing::error!(session_id = %id, error = %error, "chat request failed");
            error_mapper(error)
        })?;
    Ok(Json(turn))
}

pub async fn reset_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    let session = state.sessions.get(id).await.map_err(error_mapper)?;
    let mut session = session.lock().await;
    state.chat.reset(&mut session.history);
    tracing::info!(session_id = %id, "chat history reset");
    Ok(StatusCode::NO_CONTENT)
}
