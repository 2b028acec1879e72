//! Time Capsule Messenger - write a message to the future and read the reply
//!
//! Serves a single form page that sends the message, a target year and a tone
//! to an OpenAI chat model, and can render a futuristic image through the
//! OpenAI image endpoint.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;
pub mod prompts;
pub mod web;

pub use error::{Error, Result};
