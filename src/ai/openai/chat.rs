use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::ChatService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const CHAT_TEMPERATURE: f64 = 0.7;

pub struct OpenAiChatClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Ok(Self {
            http: OpenAiHttpClient::new(api_key, Duration::from_secs(30))?,
            model,
        })
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, client),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatService for OpenAiChatClient {
    async fn reply(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::CHAT_SYSTEM),
                ChatMessage::user(prompt),
            ],
            temperature: CHAT_TEMPERATURE,
            n: 1,
        };

        let response = self.http.chat_completion(&request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))
    }
}
