//! Chat endpoint

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;

use super::ApiState;
use super::error::{ApiError, method_not_allowed, preflight};
use crate::chat::{ChatMode, ChatOutcome, ChatRequest, FALLBACK_MODEL};
use crate::providers::Usage;

/// Build chat router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/chat",
            post(chat).options(preflight).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub mode: ChatMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for ChatOutcome {
    fn into_response(self) -> Response {
        let mode = self.mode();
        let (status, body) = match self {
            Self::Live {
                response,
                model,
                usage,
            } => (
                StatusCode::OK,
                ChatResponse {
                    ok: true,
                    response,
                    model: Some(model),
                    mode,
                    usage,
                    error: None,
                },
            ),
            Self::Fallback { response } => (
                StatusCode::OK,
                ChatResponse {
                    ok: true,
                    response,
                    model: Some(FALLBACK_MODEL.to_string()),
                    mode,
                    usage: None,
                    error: None,
                },
            ),
            // Error status, but the body still carries a usable reply
            Self::Degraded { error, response } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ChatResponse {
                    ok: false,
                    response,
                    model: None,
                    mode,
                    usage: None,
                    error: Some(error),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Answer a chat message
async fn chat(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<ChatOutcome, ApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "unreadable chat request body");
        ChatRequest::default()
    });

    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or(ApiError::BadRequest("Message is required"))?;

    Ok(state
        .chat
        .respond(&message, request.context.as_deref())
        .await)
}
