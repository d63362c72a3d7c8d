//! Configuration management for the EMMA gateway
//!
//! Precedence is env > TOML file > built-in default. The provider credential
//! is optional: without it both endpoints run in demo mode.

pub mod file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;

use crate::prompt::Persona;
use crate::{Error, Result};

pub use file::{EmmaConfigFile, config_file_path, load_config_file, read_config_file};

/// Default `OpenAI` API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default TTS model
pub const DEFAULT_TTS_MODEL: &str = "tts-1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// EMMA gateway configuration
#[derive(Debug)]
pub struct Config {
    /// Chat/speech provider configuration
    pub provider: ProviderConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Persona used for live chat
    pub persona: Persona,
}

/// Upstream provider configuration
#[derive(Debug)]
pub struct ProviderConfig {
    /// `OpenAI` API key (from `OPENAI_API_KEY`); `None` means demo mode
    pub api_key: Option<SecretString>,

    /// API base URL
    pub base_url: String,

    /// Chat completion model
    pub chat_model: String,

    /// Speech synthesis model
    pub tts_model: String,

    /// Outbound request timeout
    pub timeout: Duration,

    /// Completion token limit
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl ProviderConfig {
    /// Whether a live provider credential is configured
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.api_key.is_some()
    }
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Path to static files directory (web UI)
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the TOML file and process environment
    ///
    /// With `path` set the file must exist and parse; otherwise the standard
    /// location is tried and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit config file cannot be loaded or an env
    /// value is malformed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let fc = match path {
            Some(path) => read_config_file(path)?,
            None => load_config_file(),
        };

        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with values from an env lookup
    ///
    /// # Errors
    ///
    /// Returns error if a numeric env value cannot be parsed
    pub fn from_sources(
        fc: EmmaConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = ProviderConfig::default();

        // An empty key is the same as no key
        let api_key = env("OPENAI_API_KEY")
            .or(fc.provider.api_key)
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);

        let timeout_secs = parse_env(&env, "EMMA_PROVIDER_TIMEOUT_SECS")?
            .or(fc.provider.timeout_secs)
            .unwrap_or(defaults.timeout.as_secs());

        let provider = ProviderConfig {
            api_key,
            base_url: env("OPENAI_BASE_URL")
                .or(fc.provider.base_url)
                .unwrap_or(defaults.base_url),
            chat_model: env("EMMA_CHAT_MODEL")
                .or(fc.provider.chat_model)
                .unwrap_or(defaults.chat_model),
            tts_model: env("EMMA_TTS_MODEL")
                .or(fc.provider.tts_model)
                .unwrap_or(defaults.tts_model),
            timeout: Duration::from_secs(timeout_secs),
            max_tokens: fc.provider.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: fc.provider.temperature.unwrap_or(defaults.temperature),
        };

        let server_defaults = ServerConfig::default();
        let port = match parse_env(&env, "EMMA_PORT")? {
            Some(port) => Some(port),
            None => parse_env(&env, "PORT")?,
        };
        let server = ServerConfig {
            host: env("EMMA_HOST")
                .or(fc.server.host)
                .unwrap_or(server_defaults.host),
            port: port.or(fc.server.port).unwrap_or(server_defaults.port),
            static_dir: env("EMMA_STATIC_DIR")
                .map(PathBuf::from)
                .or(fc.server.static_dir),
        };

        let persona_defaults = Persona::default();
        let persona = Persona {
            name: fc.persona.name.unwrap_or(persona_defaults.name),
            title: fc.persona.title.unwrap_or(persona_defaults.title),
            advisor: fc.persona.advisor.unwrap_or(persona_defaults.advisor),
            market: fc.persona.market.unwrap_or(persona_defaults.market),
        };

        Ok(Self {
            provider,
            server,
            persona,
        })
    }

    /// Label for the active mode, as reported by `/ready`
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        if self.provider.is_live() { "live" } else { "demo" }
    }
}

fn parse_env<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    env(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid value for {key}: {raw:?}")))
        })
        .transpose()
}
