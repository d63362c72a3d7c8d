//! TOML configuration file loading
//!
//! Supports `~/.config/emma/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct EmmaConfigFile {
    /// Chat and speech provider configuration
    #[serde(default)]
    pub provider: ProviderFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,

    /// Assistant persona used in the system prompt
    #[serde(default)]
    pub persona: PersonaFileConfig,
}

/// Provider configuration
#[derive(Debug, Default, Deserialize)]
pub struct ProviderFileConfig {
    pub api_key: Option<String>,

    /// API base URL (e.g. `https://api.openai.com/v1`)
    pub base_url: Option<String>,

    /// Chat model (e.g. "gpt-4o-mini")
    pub chat_model: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    pub timeout_secs: Option<u64>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Server configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,

    /// Directory with the web UI to serve
    pub static_dir: Option<PathBuf>,
}

/// Persona overrides
#[derive(Debug, Default, Deserialize)]
pub struct PersonaFileConfig {
    pub name: Option<String>,
    pub title: Option<String>,
    pub advisor: Option<String>,
    pub market: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `EmmaConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> EmmaConfigFile {
    let Some(path) = config_file_path() else {
        return EmmaConfigFile::default();
    };

    if !path.exists() {
        return EmmaConfigFile::default();
    }

    match read_config_file(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            EmmaConfigFile::default()
        }
    }
}

/// Read and parse a config file at an explicit path
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML
pub fn read_config_file(path: &Path) -> Result<EmmaConfigFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Return the config file path: `~/.config/emma/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("emma").join("config.toml"))
}
