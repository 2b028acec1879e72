//! AI service integration for future replies and visuals
//!
//! Provides the service traits used by the app and the OpenAI-backed
//! implementations of the chat completion and image generation endpoints.

pub mod mock;
pub mod openai;

pub use mock::{MockChatClient, MockImageGenerationClient};
pub use openai::{OpenAiChatClient, OpenAiImageClient};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send `prompt` as the user turn after the fixed persona instruction and
    /// return the trimmed text of the first choice.
    async fn reply(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate one image for `description` and return its URL.
    async fn generate_image_url(&self, description: &str) -> Result<String>;
}
