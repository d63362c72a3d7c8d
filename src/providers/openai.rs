//! `OpenAI` chat completion and speech client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ChatCompletion, ChatProvider, Completion, SpeechProvider, Usage};
use crate::config::ProviderConfig;
use crate::{Error, Result};

/// Audio container requested from the speech endpoint
pub const SPEECH_FORMAT: &str = "mp3";

/// `OpenAI` API client
pub struct OpenAiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
    tts_model: String,
}

impl OpenAiClient {
    /// Create a client from provider configuration
    ///
    /// Returns `Ok(None)` when no API key is configured.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn from_config(config: &ProviderConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.as_ref() else {
            return Ok(None);
        };

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Some(Self {
            client,
            api_key: SecretString::from(api_key.expose_secret()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tts_model: config.tts_model.clone(),
        }))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, request: &ChatCompletion) -> Result<Completion> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: [
                Message {
                    role: "system",
                    content: &request.system_prompt,
                },
                Message {
                    role: "user",
                    content: &request.message,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let result: ChatCompletionResponse = self.post("chat/completions", &body).await?.json().await?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty());

        Ok(Completion {
            content,
            usage: result.usage,
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[async_trait]
impl SpeechProvider for OpenAiClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let body = SpeechRequest {
            model: &self.tts_model,
            input: text,
            voice,
            response_format: SPEECH_FORMAT,
        };

        let audio = self.post("audio/speech", &body).await?.bytes().await?;
        Ok(audio.to_vec())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}
