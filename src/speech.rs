//! Speech responder
//!
//! Synthesizes text with the configured speech provider and hands back
//! base64 audio. Every failure turns into a signal for the client to use its
//! own speech synthesizer.

use std::sync::Arc;

use base64::Engine;
use serde::Deserialize;

use crate::chat::string_or_none;
use crate::providers::SpeechProvider;
use crate::providers::openai::SPEECH_FORMAT;

/// Longest text forwarded to the provider, in characters
pub const MAX_SPEECH_CHARS: usize = 1000;

/// Voice used when the request doesn't name one
pub const DEFAULT_VOICE: &str = "nova";

/// Browser-fallback message when no provider is configured
pub const NO_PROVIDER_MESSAGE: &str = "Use browser SpeechSynthesis API";

/// Browser-fallback message when the provider rejected the request
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "TTS API unavailable, use browser fallback";

/// Browser-fallback message for transport and other failures
pub const PROVIDER_ERROR_MESSAGE: &str = "TTS error, use browser fallback";

/// Incoming speech request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub voice: Option<String>,
}

/// Outcome of one synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Provider audio, base64-encoded
    Audio {
        audio: String,
        format: &'static str,
        voice: String,
    },
    /// Client should synthesize `text` locally
    Browser { message: &'static str, text: String },
}

/// Truncate text to [`MAX_SPEECH_CHARS`] characters
#[must_use]
pub fn truncate_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_SPEECH_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Turns text into speech
#[derive(Clone)]
pub struct SpeechResponder {
    provider: Option<Arc<dyn SpeechProvider>>,
}

impl SpeechResponder {
    /// Create a responder; `provider` is `None` in demo mode
    #[must_use]
    pub fn new(provider: Option<Arc<dyn SpeechProvider>>) -> Self {
        Self { provider }
    }

    /// Synthesize non-empty text, truncating it first
    pub async fn respond(&self, text: &str, voice: Option<&str>) -> SpeechOutcome {
        let text = truncate_text(text);
        let voice = voice.filter(|v| !v.is_empty()).unwrap_or(DEFAULT_VOICE);

        let Some(provider) = &self.provider else {
            return SpeechOutcome::Browser {
                message: NO_PROVIDER_MESSAGE,
                text: text.to_string(),
            };
        };

        match provider.synthesize(text, voice).await {
            Ok(audio) => {
                tracing::debug!(
                    provider = provider.name(),
                    voice,
                    bytes = audio.len(),
                    chars = text.chars().count(),
                    "speech synthesized"
                );
                SpeechOutcome::Audio {
                    audio: base64::engine::general_purpose::STANDARD.encode(audio),
                    format: SPEECH_FORMAT,
                    voice: voice.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(provider = provider.name(), error = %e, "speech synthesis failed");
                let message = if e.is_provider_status() {
                    PROVIDER_UNAVAILABLE_MESSAGE
                } else {
                    PROVIDER_ERROR_MESSAGE
                };
                SpeechOutcome::Browser {
                    message,
                    text: text.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{Error, Result};

    struct Echo {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl SpeechProvider for Echo {
        async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
            self.seen
                .lock()
                .unwrap()
                .push((text.to_string(), voice.to_string()));
            Ok(b"ID3fake-mp3".to_vec())
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    struct Rejecting;

    #[async_trait]
    impl SpeechProvider for Rejecting {
        async fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>> {
            Err(Error::Provider {
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                body: "quota exceeded".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "rejecting"
        }
    }

    struct Broken;

    #[async_trait]
    impl SpeechProvider for Broken {
        async fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>> {
            Err(Error::Config("connection reset".to_string()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_request_ignores_non_string_voice() {
        let request: SpeechRequest =
            serde_json::from_str(r#"{"text":"hello","voice":5}"#).unwrap();
        assert_eq!(request.text.as_deref(), Some("hello"));
        assert!(request.voice.is_none());
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_text("hello"), "hello");
        assert_eq!(truncate_text(""), "");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "a".repeat(1500);
        assert_eq!(truncate_text(&long).len(), MAX_SPEECH_CHARS);

        let exact = "b".repeat(MAX_SPEECH_CHARS);
        assert_eq!(truncate_text(&exact), exact);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let long = "é".repeat(1200);
        let truncated = truncate_text(&long);
        assert_eq!(truncated.chars().count(), MAX_SPEECH_CHARS);
        assert_eq!(truncated.len(), MAX_SPEECH_CHARS * 2);
    }

    #[tokio::test]
    async fn test_no_provider_signals_browser() {
        let outcome = SpeechResponder::new(None).respond("hello", None).await;
        assert_eq!(
            outcome,
            SpeechOutcome::Browser {
                message: NO_PROVIDER_MESSAGE,
                text: "hello".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_provider_audio_is_base64() {
        let provider = Arc::new(Echo {
            seen: Mutex::new(Vec::new()),
        });
        let shared: Arc<dyn SpeechProvider> = provider.clone();
        let outcome = SpeechResponder::new(Some(shared))
            .respond("Good morning", Some("onyx"))
            .await;

        let SpeechOutcome::Audio { audio, format, voice } = outcome else {
            panic!("expected audio outcome");
        };
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(audio)
            .unwrap();
        assert_eq!(decoded, b"ID3fake-mp3");
        assert_eq!(format, "mp3");
        assert_eq!(voice, "onyx");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0], ("Good morning".to_string(), "onyx".to_string()));
    }

    #[tokio::test]
    async fn test_default_voice_and_truncation_reach_provider() {
        let provider = Arc::new(Echo {
            seen: Mutex::new(Vec::new()),
        });
        let shared: Arc<dyn SpeechProvider> = provider.clone();
        let long = "x".repeat(2000);
        SpeechResponder::new(Some(shared)).respond(&long, None).await;

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].0.len(), MAX_SPEECH_CHARS);
        assert_eq!(seen[0].1, DEFAULT_VOICE);
    }

    #[tokio::test]
    async fn test_provider_rejection_degrades() {
        let outcome = SpeechResponder::new(Some(Arc::new(Rejecting) as Arc<dyn SpeechProvider>))
            .respond("hello", None)
            .await;
        assert_eq!(
            outcome,
            SpeechOutcome::Browser {
                message: PROVIDER_UNAVAILABLE_MESSAGE,
                text: "hello".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_degrades_with_truncated_text() {
        let long = "y".repeat(1001);
        let outcome = SpeechResponder::new(Some(Arc::new(Broken) as Arc<dyn SpeechProvider>))
            .respond(&long, None)
            .await;

        let SpeechOutcome::Browser { message, text } = outcome else {
            panic!("expected browser outcome");
        };
        assert_eq!(message, PROVIDER_ERROR_MESSAGE);
        assert_eq!(text.len(), MAX_SPEECH_CHARS);
    }
}
