//! Configuration types for Rolechat.
//!
//! `RolechatConfig` represents `config.toml` in the data directory. All
//! fields have sensible defaults so a missing or empty file works out of
//! the box.

use serde::{Deserialize, Serialize};

use crate::completion::GenerationOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolechatConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed by CORS; the front-end dev server by default.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origin() -> String {
    "http://localhost:8081".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

/// Completion endpoint settings.
///
/// The endpoint is any OpenAI-compatible `chat/completions` server
/// (llama.cpp `llama-server`, Ollama, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout. Completion calls can take tens of seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub generation: GenerationOptions,
}

fn default_base_url() -> String {
    "http://localhost:8080/v1".to_string()
}

fn default_model() -> String {
    "llama-3.2-3b".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            generation: GenerationOptions::default(),
        }
    }
}

/// Conversation window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of messages sent to the completion endpoint.
    /// Truncation drops the oldest entries first.
    #[serde(default = "default_max_context_messages")]
    pub max_context_messages: usize,
}

fn default_max_context_messages() -> usize {
    2048
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_context_messages: default_max_context_messages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = RolechatConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origin, "http://localhost:8081");
        assert_eq!(config.completion.base_url, "http://localhost:8080/v1");
        assert_eq!(config.completion.generation.max_tokens, 512);
        assert_eq!(config.chat.max_context_messages, 2048);
    }

    #[test]
    fn test_config_deserialize_empty_toml() {
        let config: RolechatConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.completion.timeout_secs, 120);
    }

    #[test]
    fn test_config_deserialize_partial_toml() {
        let toml_str = r#"
[server]
port = 9001

[completion]
model = "qwen2.5-7b"

[completion.generation]
temperature = 0.9
"#;
        let config: RolechatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.completion.model, "qwen2.5-7b");
        assert!((config.completion.generation.temperature - 0.9).abs() < f64::EPSILON);
        // Untouched sections keep their defaults.
        assert_eq!(config.completion.generation.max_tokens, 512);
        assert_eq!(config.chat.max_context_messages, 2048);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = RolechatConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RolechatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.chat.max_context_messages, config.chat.max_context_messages);
    }
}
