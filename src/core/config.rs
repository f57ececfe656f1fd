//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parlo/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The API key is resolved here but deliberately kept optional: a missing
//! credential surfaces as a request-time failure, not a startup failure.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::language::Language;
use crate::inference::providers::openai::DEFAULT_OPENAI_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParloConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    /// Preselected target language (two-letter code in TOML).
    pub language: Option<Language>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

pub const DEFAULT_MODEL: &str = "gpt-5-mini";

// ============================================================================
// Resolved Config (concrete values, no Options where a default exists)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    /// None means the user still has to pick in the input view.
    pub language: Option<Language>,
    /// None is allowed; the provider reports it when a request goes out.
    pub api_key: Option<String>,
    pub base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.parlo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parlo").join("config.toml"))
}

/// Load config from `~/.parlo/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParloConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParloConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParloConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParloConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ParloConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Parlo Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gpt-5-mini"
# language = "fr"                 # "fr", "es", "ja", or "en"

# [openai]
# api_key = "sk-..."              # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_model` and `cli_language` are from CLI flags (None = not specified).
pub fn resolve(
    config: &ParloConfig,
    cli_model: Option<&str>,
    cli_language: Option<Language>,
) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLO_MODEL").ok())
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Language: CLI → config (no env override; unset stays unset so the
    // picker is shown)
    let language = cli_language.or(config.general.language);

    // API key: env → config
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .or_else(|| config.openai.api_key.clone());

    // Base URL: env → config → default
    let base_url = std::env::var("OPENAI_BASE_URL")
        .ok()
        .or_else(|| config.openai.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

    ResolvedConfig {
        model_name,
        language,
        api_key,
        base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ParloConfig::default();
        assert!(config.general.model.is_none());
        assert!(config.general.language.is_none());
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ParloConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
        assert_eq!(resolved.base_url, DEFAULT_OPENAI_BASE_URL);
        assert!(resolved.language.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParloConfig {
            general: GeneralConfig {
                model: Some("my-model".to_string()),
                language: Some(Language::Spanish),
            },
            openai: OpenAiConfig {
                api_key: Some("sk-test-123".to_string()),
                base_url: Some("http://localhost:9999/v1".to_string()),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.model_name, "my-model");
        assert_eq!(resolved.language, Some(Language::Spanish));
        assert_eq!(resolved.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(resolved.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = ParloConfig {
            general: GeneralConfig {
                model: Some("config-model".to_string()),
                language: Some(Language::Spanish),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("cli-model"), Some(Language::Japanese));
        assert_eq!(resolved.model_name, "cli-model");
        assert_eq!(resolved.language, Some(Language::Japanese));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
model = "gpt-5-mini"
language = "ja"

[openai]
api_key = "sk-test-123"
base_url = "http://localhost:1234/v1"
"#;
        let config: ParloConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("gpt-5-mini"));
        assert_eq!(config.general.language, Some(Language::Japanese));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
model = "my-model"
"#;
        let config: ParloConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("my-model"));
        assert!(config.general.language.is_none());
        assert!(config.openai.api_key.is_none());
    }
}
