//! Chat-completion client for `docqa`.
//!
//! Exposes the [`ChatModel`] trait and the OpenAI-backed [`OpenAiChat`]
//! implementation used by the query binary.

pub mod chat;
pub mod config;
pub mod error;
pub mod openai;

pub use chat::ChatModel;
pub use config::{ChatConfig, DEFAULT_CHAT_MODEL};
pub use error::{ModelError, Result};
pub use openai::OpenAiChat;
