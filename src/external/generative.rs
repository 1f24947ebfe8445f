use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ProviderError;
use crate::config::GenerativeApiConfig;

/// One turn of a chat-completion conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the conversation and return the model's reply text.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat-completions client for the generative-language API. Plain
/// request/response, no streaming.
pub struct GenerativeClient {
    config: GenerativeApiConfig,
    http: reqwest::Client,
}

impl GenerativeClient {
    pub fn new(config: GenerativeApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatModel for GenerativeClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: turns,
        };

        debug!(model = %self.config.model, turns = turns.len(), "chat completion request");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                service: "generative API",
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| ProviderError::Payload {
            service: "generative API",
            detail: e.to_string(),
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ProviderError::Payload {
                service: "generative API",
                detail: "empty choices".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_chat_completions_shape() {
        let turns = vec![
            ChatTurn::system("You are a dietitian."),
            ChatTurn::user("What should I eat?"),
        ];
        let request = ChatRequest {
            model: "test-model",
            messages: &turns,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "What should I eat?");
    }

    #[test]
    fn response_parses_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Eat more greens."}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.choices[0].message.content, "Eat more greens.");
    }
}
