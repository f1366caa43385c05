use crate::{error::ApiError, state::AppState};
use alfred::models::chat::{ChatRequest, ChatResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};

async fn chat_completions(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    // Accepted for client compatibility, never validated
    if headers.contains_key("authorization") {
        tracing::debug!("ignoring authorization header");
    }

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("rejected chat request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    tracing::info!(
        model = %request.model,
        messages = request.messages.len(),
        "chat completion request"
    );

    let response = state.service.complete(&request).await.map_err(|err| {
        if err.is_client_error() {
            tracing::warn!("rejected chat request: {}", err);
        }
        ApiError::from(err)
    })?;
    Ok(Json(response))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state)
}
