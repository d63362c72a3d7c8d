//! Text-to-speech endpoint

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;

use super::ApiState;
use super::error::{ApiError, method_not_allowed, preflight};
use crate::speech::{SpeechOutcome, SpeechRequest};

/// Build speech router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/tts",
            post(synthesize).options(preflight).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// Speech response body
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SpeechResponse {
    /// Audio from the provider
    #[serde(rename = "openai")]
    OpenAi {
        ok: bool,
        audio: String,
        format: &'static str,
        voice: String,
    },
    /// Client should use its own synthesizer
    Browser {
        ok: bool,
        message: &'static str,
        text: String,
    },
}

impl From<SpeechOutcome> for SpeechResponse {
    fn from(outcome: SpeechOutcome) -> Self {
        match outcome {
            SpeechOutcome::Audio {
                audio,
                format,
                voice,
            } => Self::OpenAi {
                ok: true,
                audio,
                format,
                voice,
            },
            SpeechOutcome::Browser { message, text } => Self::Browser {
                ok: true,
                message,
                text,
            },
        }
    }
}

impl IntoResponse for SpeechOutcome {
    fn into_response(self) -> Response {
        Json(SpeechResponse::from(self)).into_response()
    }
}

/// Synthesize text to speech
///
/// Always answers 200 once the text is present; failures fall back to
/// browser synthesis.
async fn synthesize(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<SpeechOutcome, ApiError> {
    let request = payload.map(|Json(r)| r).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "unreadable speech request body");
        SpeechRequest::default()
    });

    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::BadRequest("Text is required"))?;

    Ok(state
        .speech
        .respond(&text, request.voice.as_deref())
        .await)
}
