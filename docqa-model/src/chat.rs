//! Chat model trait.

use async_trait::async_trait;

use crate::error::Result;

/// A chat-completion backend that answers a single prompt with plain text.
///
/// No conversation state is kept between calls; each prompt stands alone.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `prompt` to the model and return the response text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn name(&self) -> &str;
}
