use super::client::OpenAiHttpClient;
use super::types::ImageGenerationRequest;
use crate::ai::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const IMAGE_SIZE: &str = "1024x1024";

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Ok(Self {
            http: OpenAiHttpClient::new(api_key, Duration::from_secs(60))?,
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
impl ImageGenerationService for OpenAiImageClient {
    async fn generate_image_url(&self, description: &str) -> Result<String> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: description.to_string(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
        };

        let response = self.http.image_generation(&request).await?;

        let image = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No image data in OpenAI response".to_string()))?;

        image
            .url
            .ok_or_else(|| Error::AiProvider("No image URL in OpenAI response".to_string()))
    }
}
