//! EMMA Gateway - chat and text-to-speech gateway for the EMMA assistant
//!
//! Two stateless endpoints front a generative AI provider:
//! - `POST /api/chat` answers a message live, or from canned fallback
//!   responses when no provider key is configured
//! - `POST /api/tts` returns base64 MP3 audio, or asks the client to use its
//!   own speech synthesizer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 HTTP (axum)                  │
//! │    /api/chat   │   /api/tts   │   /health    │
//! └───────┬────────────────┬─────────────────────┘
//!         │                │
//! ┌───────▼──────┐  ┌──────▼───────┐
//! │ChatResponder │  │SpeechResponder│
//! │  + fallback  │  │ + truncation  │
//! └───────┬──────┘  └──────┬───────┘
//!         │                │
//! ┌───────▼────────────────▼─────────────────────┐
//! │        Provider (OpenAI, optional)           │
//! └──────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod fallback;
pub mod prompt;
pub mod providers;
pub mod speech;

pub use api::{ApiServer, ApiServerBuilder, ApiState};
pub use chat::{ChatMode, ChatOutcome, ChatRequest, ChatResponder};
pub use config::Config;
pub use error::{Error, Result};
pub use fallback::Intent;
pub use prompt::Persona;
pub use providers::{ChatProvider, OpenAiClient, SpeechProvider, build_responders};
pub use speech::{SpeechOutcome, SpeechRequest, SpeechResponder};
