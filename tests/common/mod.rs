//! Shared test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use emma_gateway::config::{ProviderConfig, ServerConfig};
use emma_gateway::providers::{ChatCompletion, Completion, Usage};
use emma_gateway::{
    ApiServerBuilder, ChatProvider, ChatResponder, Error, Persona, Result, SpeechProvider,
    SpeechResponder,
};
use tower::ServiceExt;

/// Chat provider returning a fixed reply, or failing when `reply` is `None`
pub struct StubChat {
    pub reply: Option<String>,
}

#[async_trait]
impl ChatProvider for StubChat {
    async fn complete(&self, _request: &ChatCompletion) -> Result<Completion> {
        match &self.reply {
            Some(reply) => Ok(Completion {
                content: Some(reply.clone()),
                usage: Some(Usage {
                    prompt_tokens: 120,
                    completion_tokens: 30,
                    total_tokens: 150,
                }),
            }),
            None => Err(Error::Provider {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "upstream exploded".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Speech provider recording the text it receives
pub struct StubSpeech {
    pub fail: bool,
    pub seen: Mutex<Vec<String>>,
}

impl StubSpeech {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SpeechProvider for StubSpeech {
    async fn synthesize(&self, text: &str, _voice: &str) -> Result<Vec<u8>> {
        self.seen.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(Error::Config("connection refused".to_string()));
        }
        Ok(vec![0xFF, 0xFB, 0x90, 0x00])
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Router with no provider configured
pub fn demo_router() -> axum::Router {
    ApiServerBuilder::new(ServerConfig::default()).build().router()
}

/// Router with the given providers attached
pub fn live_router(
    chat: Arc<dyn ChatProvider>,
    speech: Arc<dyn SpeechProvider>,
) -> axum::Router {
    let provider = ProviderConfig::default();
    ApiServerBuilder::new(ServerConfig::default())
        .chat(ChatResponder::new(Some(chat), &provider, Persona::default()))
        .speech(SpeechResponder::new(Some(speech)))
        .models(&provider)
        .build()
        .router()
}

/// POST a JSON body
pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
