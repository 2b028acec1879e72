use super::{ChatService, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type Canned = std::result::Result<String, String>;

/// Pick the canned response for the `count`-th call, cycling through the list.
fn canned(responses: &[Canned], count: usize) -> Option<Result<String>> {
    if responses.is_empty() {
        return None;
    }
    let index = (count - 1) % responses.len();
    Some(responses[index].clone().map_err(Error::AiProvider))
}

#[derive(Clone, Default)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<Canned>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: String) -> Self {
        self.responses.lock().unwrap().push(Ok(reply));
        self
    }

    /// Queue a failure surfaced as an [`Error::AiProvider`] with `message`.
    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn reply(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        canned(&responses, *count)
            .unwrap_or_else(|| Ok("Greetings from the future!".to_string()))
            .map(|reply| reply.trim().to_string())
    }
}

#[derive(Clone, Default)]
pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<Canned>>>,
    descriptions: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_url(self, url: String) -> Self {
        self.responses.lock().unwrap().push(Ok(url));
        self
    }

    /// Queue a failure surfaced as an [`Error::AiProvider`] with `message`.
    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn received_descriptions(&self) -> Vec<String> {
        self.descriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image_url(&self, description: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.descriptions.lock().unwrap().push(description.to_string());

        let responses = self.responses.lock().unwrap();
        canned(&responses, *count)
            .unwrap_or_else(|| Ok("https://images.example.com/future.png".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chat_default_reply() {
        let client = MockChatClient::new();
        let reply = client.reply("hello").await.unwrap();
        assert_eq!(reply, "Greetings from the future!");
        assert_eq!(client.received_prompts(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_chat_custom_responses_cycle() {
        let client = MockChatClient::new()
            .with_reply("Reply 1".to_string())
            .with_error("boom".to_string());

        assert_eq!(client.reply("a").await.unwrap(), "Reply 1");

        let err = client.reply("b").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(ref m) if m == "boom"));

        // Should cycle back
        assert_eq!(client.reply("c").await.unwrap(), "Reply 1");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_image_client_call_count() {
        let client = MockImageGenerationClient::new()
            .with_image_url("https://example.com/img.png".to_string());

        assert_eq!(client.get_call_count(), 0);
        let url = client.generate_image_url("scene").await.unwrap();
        assert_eq!(url, "https://example.com/img.png");
        assert_eq!(client.get_call_count(), 1);
        assert_eq!(client.received_descriptions(), vec!["scene".to_string()]);
    }
}
