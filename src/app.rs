//! Action handlers behind the two buttons of the page.
//!
//! Each handler is a stateless validate → build prompt → call service
//! sequence that always resolves to an [`Outcome`] for the page to render.

use crate::ai::{ChatService, ImageGenerationService, OpenAiChatClient, OpenAiImageClient};
use crate::models::{Config, FutureParameters, FutureYear, GeneratedContent, Message, Tone};
use crate::{prompts, Result};
use serde::Serialize;
use tracing::{error, info, warn};

/// What the page shows after one button press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Input was rejected before any service call.
    Warning { message: String },
    Success { content: GeneratedContent },
    /// The service call failed; `message` carries the failure description.
    Error { message: String },
}

pub struct App {
    chat: Box<dyn ChatService>,
    image_gen: Box<dyn ImageGenerationService>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
}

impl App {
    pub fn with_services(services: AppServices) -> Self {
        Self {
            chat: services.chat,
            image_gen: services.image_gen,
        }
    }

    /// Construct the OpenAI-backed app from loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across both clients.
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        info!("Chat model: {}", config.chat_model);
        info!("Image model: {}", config.image_model);

        let chat = OpenAiChatClient::new_with_client(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.openai_base_url.clone());

        let image_gen = OpenAiImageClient::new_with_client(
            config.openai_api_key.clone(),
            config.image_model.clone(),
            http_client,
        )
        .with_base_url(config.openai_base_url.clone());

        Ok(Self::with_services(AppServices {
            chat: Box::new(chat),
            image_gen: Box::new(image_gen),
        }))
    }

    /// Handle "Send to the Future": validate the message, ask the chat
    /// service for a reply written from `year` in `tone`.
    pub async fn send_message(&self, message: &str, year: u16, tone: Tone) -> Outcome {
        let (message, params) = match validate(message, year, tone) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                return Outcome::Warning {
                    message: e.to_string(),
                };
            }
        };

        info!(
            "Sending message to the future (year {}, tone {})",
            params.year, params.tone
        );
        let prompt = prompts::build_future_prompt(&message, &params);

        match self.chat.reply(&prompt).await {
            Ok(reply) => Outcome::Success {
                content: GeneratedContent::Text(reply),
            },
            Err(e) => {
                error!("Chat completion failed: {}", e);
                Outcome::Error {
                    message: format!("Error generating response: {}", e),
                }
            }
        }
    }

    /// Handle "Generate Futuristic Visual". The description is fixed and
    /// independent of the form input.
    pub async fn generate_visual(&self) -> Outcome {
        info!("Generating futuristic visual");

        match self.image_gen.generate_image_url(prompts::IMAGE_DESCRIPTION).await {
            Ok(url) => Outcome::Success {
                content: GeneratedContent::ImageUrl(url),
            },
            Err(e) => {
                error!("Image generation failed: {}", e);
                Outcome::Error {
                    message: format!("Error generating futuristic visual: {}", e),
                }
            }
        }
    }
}

fn validate(message: &str, year: u16, tone: Tone) -> Result<(Message, FutureParameters)> {
    let message = Message::parse(message)?;
    let year = FutureYear::new(year)?;
    Ok((message, FutureParameters { year, tone }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockChatClient, MockImageGenerationClient};
    use crate::models::DEFAULT_OPENAI_BASE_URL;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn app_with(chat: &MockChatClient, image_gen: &MockImageGenerationClient) -> App {
        App::with_services(AppServices {
            chat: Box::new(chat.clone()),
            image_gen: Box::new(image_gen.clone()),
        })
    }

    #[tokio::test]
    async fn test_blank_message_warns_without_calling_chat() {
        let chat = MockChatClient::new();
        let app = app_with(&chat, &MockImageGenerationClient::new());

        for message in ["", "   ", "\n\t"] {
            let outcome = app.send_message(message, 2050, Tone::Optimistic).await;
            assert_eq!(
                outcome,
                Outcome::Warning {
                    message: Message::EMPTY_WARNING.to_string()
                }
            );
        }
        assert_eq!(chat.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_year_warns_without_calling_chat() {
        let chat = MockChatClient::new();
        let app = app_with(&chat, &MockImageGenerationClient::new());

        let outcome = app.send_message("hello", 1999, Tone::Optimistic).await;
        assert!(matches!(outcome, Outcome::Warning { .. }));
        assert_eq!(chat.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_message_returns_reply() {
        let chat = MockChatClient::new().with_reply(" Hello from 2050! ".to_string());
        let app = app_with(&chat, &MockImageGenerationClient::new());

        let outcome = app.send_message("Dear future me", 2050, Tone::SciFi).await;
        assert_eq!(
            outcome,
            Outcome::Success {
                content: GeneratedContent::Text("Hello from 2050!".to_string())
            }
        );

        let prompts = chat.received_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Dear future me"));
        assert!(prompts[0].contains("2050"));
        assert!(prompts[0].contains("sci-fi"));
    }

    #[tokio::test]
    async fn test_send_message_failure_becomes_error_outcome() {
        let chat = MockChatClient::new().with_error("network timeout".to_string());
        let app = app_with(&chat, &MockImageGenerationClient::new());

        let outcome = app.send_message("hello", 2100, Tone::Realistic).await;
        match outcome {
            Outcome::Error { message } => {
                assert!(message.starts_with("Error generating response:"));
                assert!(message.contains("network timeout"));
            }
            other => panic!("expected error outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_visual_uses_fixed_description() {
        let image_gen = MockImageGenerationClient::new()
            .with_image_url("https://example.com/img.png".to_string());
        let app = app_with(&MockChatClient::new(), &image_gen);

        let outcome = app.generate_visual().await;
        assert_eq!(
            outcome,
            Outcome::Success {
                content: GeneratedContent::ImageUrl("https://example.com/img.png".to_string())
            }
        );
        assert_eq!(
            image_gen.received_descriptions(),
            vec![prompts::IMAGE_DESCRIPTION.to_string()]
        );
    }

    #[tokio::test]
    async fn test_generate_visual_failure_becomes_error_outcome() {
        let image_gen = MockImageGenerationClient::new().with_error("quota exceeded".to_string());
        let app = app_with(&MockChatClient::new(), &image_gen);

        match app.generate_visual().await {
            Outcome::Error { message } => {
                assert!(message.starts_with("Error generating futuristic visual:"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("expected error outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_new_builds_from_config() {
        let config = Config {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            image_model: "dall-e-2".to_string(),
            request_timeout: Duration::from_secs(10),
        };
        assert!(App::new(&config).is_ok());
    }

    #[test]
    fn test_outcome_serializes_for_templates() {
        let json = serde_json::to_value(Outcome::Success {
            content: GeneratedContent::Text("hi".to_string()),
        })
        .unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["content"]["kind"], "text");
        assert_eq!(json["content"]["value"], "hi");
    }
}
