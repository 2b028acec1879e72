//! Data models and structures
//!
//! Defines the request-scoped values that flow through one interaction
//! (message, target year, tone, generated content) and the process-wide
//! configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Free-text message to the future. Never empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub const EMPTY_WARNING: &'static str = "Please write a message before sending it to the future.";

    /// Accept `raw` when it has non-whitespace content. The text is kept
    /// verbatim, surrounding whitespace included.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::Validation(Self::EMPTY_WARNING.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Target year, bounded to `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FutureYear(u16);

impl FutureYear {
    pub const MIN: u16 = 2025;
    pub const MAX: u16 = 2100;
    pub const DEFAULT: u16 = 2050;

    pub fn new(year: u16) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&year) {
            return Err(Error::Validation(format!(
                "The future year must be between {} and {}.",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(year))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl Default for FutureYear {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for FutureYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Optimistic,
    Humorous,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Realistic,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Optimistic, Tone::Humorous, Tone::SciFi, Tone::Realistic];

    /// Label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            Tone::Optimistic => "Optimistic",
            Tone::Humorous => "Humorous",
            Tone::SciFi => "Sci-Fi",
            Tone::Realistic => "Realistic",
        }
    }

    /// Form used inside the prompt ("sci-fi", "humorous", ...).
    pub fn instruction(self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label() == s)
            .ok_or_else(|| Error::Validation(format!("Unknown tone: {}", s)))
    }
}

/// Year and tone chosen for a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FutureParameters {
    pub year: FutureYear,
    pub tone: Tone,
}

/// Result of one button press, discarded once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GeneratedContent {
    Text(String),
    ImageUrl(String),
}

// Configuration
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-2";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load `.env` (if any) and read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key = non_blank("OPENAI_API_KEY").ok_or_else(|| {
            Error::Config(
                "OpenAI API key not found. Please set OPENAI_API_KEY in the environment or the .env file."
                    .to_string(),
            )
        })?;

        let request_timeout = match non_blank("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: non_blank("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            chat_model: non_blank("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            image_model: non_blank("IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            request_timeout,
        })
    }
}
