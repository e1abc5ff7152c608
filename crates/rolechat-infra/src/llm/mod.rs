//! Completion client for OpenAI-compatible chat endpoints.
//!
//! llama.cpp's `llama-server` and Ollama both expose a
//! `POST {base_url}/chat/completions` endpoint with the OpenAI response
//! shape; one client covers both. Built once at startup from
//! `CompletionConfig` and injected into the chat service.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use rolechat_core::completion::CompletionProvider;
use rolechat_types::completion::CompletionRequest;
use rolechat_types::config::CompletionConfig;
use rolechat_types::error::CompletionError;

/// HTTP completion provider for an OpenAI-compatible server.
pub struct LlamaServerProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl LlamaServerProvider {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": request.messages,
            "max_tokens": request.options.max_tokens,
            "temperature": request.options.temperature,
            "top_p": request.options.top_p,
            "stop": request.options.stop,
            "stream": false,
        })
    }
}

impl CompletionProvider for LlamaServerProvider {
    fn name(&self) -> &str {
        "llama-server"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, messages = request.messages.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Refused(format!("{status}: {body}")));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let first = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Malformed("no choices in response".to_string()))?;
        first
            .message
            .content
            .ok_or_else(|| CompletionError::Malformed("choice has no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolechat_types::chat::ChatMessage;
    use rolechat_types::completion::GenerationOptions;

    fn provider() -> LlamaServerProvider {
        LlamaServerProvider::new(&CompletionConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            model: "llama-3.2-3b".to_string(),
            timeout_secs: 5,
            generation: GenerationOptions::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = provider();
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let provider = provider();
        let request = CompletionRequest {
            messages: vec![ChatMessage::system("p"), ChatMessage::user("hi")],
            options: GenerationOptions::default(),
        };
        let body = provider.request_body(&request);

        assert_eq!(body["model"], "llama-3.2-3b");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["stop"][0], "</s>");
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn test_response_without_choices_parses_empty() {
        let parsed: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }
}
