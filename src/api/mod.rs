//! HTTP API server for the EMMA gateway

pub mod chat;
pub mod error;
pub mod health;
pub mod speech;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::chat::ChatResponder;
use crate::config::{Config, DEFAULT_CHAT_MODEL, DEFAULT_TTS_MODEL, ProviderConfig, ServerConfig};
use crate::prompt::Persona;
use crate::speech::SpeechResponder;

pub use error::ApiError;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub chat: ChatResponder,
    pub speech: SpeechResponder,
    pub chat_model: String,
    pub tts_model: String,
}

/// Configuration for building an API server
pub struct ApiServerBuilder {
    server: ServerConfig,
    chat: Option<ChatResponder>,
    speech: Option<SpeechResponder>,
    chat_model: String,
    tts_model: String,
}

impl ApiServerBuilder {
    /// Create a new API server builder with demo-mode responders
    #[must_use]
    pub fn new(server: ServerConfig) -> Self {
        Self {
            server,
            chat: None,
            speech: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
        }
    }

    /// Create a builder wired to the providers named in `config`
    ///
    /// # Errors
    ///
    /// Returns error if the provider client cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        let (chat, speech) = crate::providers::build_responders(config)?;

        Ok(Self::new(config.server.clone())
            .chat(chat)
            .speech(speech)
            .models(&config.provider))
    }

    /// Set the chat responder
    #[must_use]
    pub fn chat(mut self, responder: ChatResponder) -> Self {
        self.chat = Some(responder);
        self
    }

    /// Set the speech responder
    #[must_use]
    pub fn speech(mut self, responder: SpeechResponder) -> Self {
        self.speech = Some(responder);
        self
    }

    /// Set the model names reported by `/ready`
    #[must_use]
    pub fn models(mut self, provider: &ProviderConfig) -> Self {
        self.chat_model.clone_from(&provider.chat_model);
        self.tts_model.clone_from(&provider.tts_model);
        self
    }

    /// Build the API server
    #[must_use]
    pub fn build(self) -> ApiServer {
        let chat = self.chat.unwrap_or_else(|| {
            ChatResponder::new(None, &ProviderConfig::default(), Persona::default())
        });
        let speech = self.speech.unwrap_or_else(|| SpeechResponder::new(None));

        let state = Arc::new(ApiState {
            chat,
            speech,
            chat_model: self.chat_model,
            tts_model: self.tts_model,
        });

        ApiServer {
            state,
            server: self.server,
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    server: ServerConfig,
}

impl ApiServer {
    /// Build the router with all routes
    #[must_use]
    pub fn router(&self) -> Router {
        let api = Router::new()
            .merge(chat::router(self.state.clone()))
            .merge(speech::router(self.state.clone()));

        let mut router = Router::new()
            .nest("/api", api)
            .merge(health::router())
            .merge(health::ready_router(self.state.clone()));

        // Serve static files if configured
        if let Some(static_dir) = &self.server.static_dir {
            let index_file = static_dir.join("index.html");
            let serve_dir =
                ServeDir::new(static_dir).not_found_service(ServeFile::new(&index_file));

            router = router.fallback_service(serve_dir);
            tracing::info!(path = %static_dir.display(), "serving static files");
        }

        // CORS layer for browser clients on any origin
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server on {addr}: {e}")))?;

        tracing::info!(%addr, "API server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
