//! Chat responder
//!
//! Forwards a message to the configured chat provider, or answers from the
//! canned fallback table when running without one.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ProviderConfig;
use crate::fallback;
use crate::prompt::{Persona, build_system_prompt};
use crate::providers::{ChatCompletion, ChatProvider, Usage};

/// Reply used when the provider returns no content
pub const EMPTY_REPLY: &str = "I apologize, I could not process that request.";

/// Model label reported in demo mode
pub const FALLBACK_MODEL: &str = "fallback";

/// Incoming chat request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub context: Option<String>,
}

/// Deserialize an optional field, treating any non-string value as absent
pub(crate) fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// How a chat reply was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Generated by the live provider
    Live,
    /// Canned reply, no provider configured
    #[serde(rename = "demo")]
    Fallback,
    /// Provider failed; canned reply substituted
    Error,
}

/// Outcome of one chat turn
///
/// Provider failures are carried as `Degraded` with a usable reply instead
/// of an error.
#[derive(Debug, Clone)]
pub enum ChatOutcome {
    Live {
        response: String,
        model: String,
        usage: Option<Usage>,
    },
    Fallback {
        response: String,
    },
    Degraded {
        error: String,
        response: String,
    },
}

impl ChatOutcome {
    #[must_use]
    pub const fn mode(&self) -> ChatMode {
        match self {
            Self::Live { .. } => ChatMode::Live,
            Self::Fallback { .. } => ChatMode::Fallback,
            Self::Degraded { .. } => ChatMode::Error,
        }
    }

    /// Reply text, whatever the mode
    #[must_use]
    pub fn response(&self) -> &str {
        match self {
            Self::Live { response, .. }
            | Self::Fallback { response }
            | Self::Degraded { response, .. } => response,
        }
    }
}

/// Answers chat messages
#[derive(Clone)]
pub struct ChatResponder {
    provider: Option<Arc<dyn ChatProvider>>,
    persona: Persona,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatResponder {
    /// Create a responder; `provider` is `None` in demo mode
    #[must_use]
    pub fn new(provider: Option<Arc<dyn ChatProvider>>, config: &ProviderConfig, persona: Persona) -> Self {
        Self {
            provider,
            persona,
            model: config.chat_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Whether a live provider is attached
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer a non-empty message
    pub async fn respond(&self, message: &str, context: Option<&str>) -> ChatOutcome {
        let Some(provider) = &self.provider else {
            tracing::warn!("no OPENAI_API_KEY configured, using fallback responses");
            return ChatOutcome::Fallback {
                response: fallback::respond(message),
            };
        };

        let request = ChatCompletion {
            model: self.model.clone(),
            system_prompt: build_system_prompt(&self.persona, context),
            message: message.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        match provider.complete(&request).await {
            Ok(completion) => {
                tracing::debug!(
                    provider = provider.name(),
                    model = %self.model,
                    usage = ?completion.usage,
                    "chat completion succeeded"
                );
                ChatOutcome::Live {
                    response: completion.content.unwrap_or_else(|| EMPTY_REPLY.to_string()),
                    model: self.model.clone(),
                    usage: completion.usage,
                }
            }
            Err(e) => {
                tracing::error!(provider = provider.name(), error = %e, "chat completion failed");
                ChatOutcome::Degraded {
                    error: e.to_string(),
                    response: fallback::respond(message),
                }
            }
        }
    }
}
