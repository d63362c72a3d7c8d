//! Upstream generative AI providers
//!
//! The responders only see these traits, so tests can swap in canned
//! providers without network access.

pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::chat::ChatResponder;
use crate::config::Config;
use crate::speech::SpeechResponder;

pub use openai::OpenAiClient;

/// A single chat completion request
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub model: String,
    pub system_prompt: String,
    pub message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Provider-reported token accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Result of a chat completion
#[derive(Debug, Clone)]
pub struct Completion {
    /// First choice content, if the provider returned any
    pub content: Option<String>,
    pub usage: Option<Usage>,
}

/// Text generation backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion
    async fn complete(&self, request: &ChatCompletion) -> Result<Completion>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Speech synthesis backend
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` with `voice`, returning MP3 bytes
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Build the chat and speech responders for a configuration
///
/// Both share one `OpenAI` client when an API key is configured and run in
/// demo mode otherwise.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be built
pub fn build_responders(config: &Config) -> Result<(ChatResponder, SpeechResponder)> {
    let client = OpenAiClient::from_config(&config.provider)?.map(Arc::new);

    let chat_provider = client.clone().map(|c| c as Arc<dyn ChatProvider>);
    let speech_provider = client.map(|c| c as Arc<dyn SpeechProvider>);

    if chat_provider.is_some() {
        tracing::info!(
            chat_model = %config.provider.chat_model,
            tts_model = %config.provider.tts_model,
            "live provider configured"
        );
    } else {
        tracing::info!("no provider credential, running in demo mode");
    }

    Ok((
        ChatResponder::new(chat_provider, &config.provider, config.persona.clone()),
        SpeechResponder::new(speech_provider),
    ))
}
