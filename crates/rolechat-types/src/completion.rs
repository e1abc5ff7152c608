//! Completion request types.
//!
//! The completion capability is a black box behind the
//! `CompletionProvider` trait in `rolechat-core`; these types describe the
//! bounded message window and the fixed generation parameters sent to it.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Fixed generation parameters for a completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Bound on generated output length.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Nucleus-sampling parameter.
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Markers that end generation.
    #[serde(default = "default_stop")]
    pub stop: Vec<String>,
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f64 {
    0.6
}

fn default_top_p() -> f64 {
    0.8
}

fn default_stop() -> Vec<String> {
    vec!["</s>".to_string(), "<|eot|>".to_string()]
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            stop: default_stop(),
        }
    }
}

/// A request to the completion capability: the windowed message sequence
/// plus generation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub options: GenerationOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let options = GenerationOptions::default();
        assert_eq!(options.max_tokens, 512);
        assert!((options.temperature - 0.6).abs() < f64::EPSILON);
        assert!((options.top_p - 0.8).abs() < f64::EPSILON);
        assert_eq!(options.stop, vec!["</s>", "<|eot|>"]);
    }

    #[test]
    fn test_generation_options_deserialize_with_defaults() {
        let options: GenerationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.max_tokens, 512);
        assert_eq!(options.stop.len(), 2);
    }
}
