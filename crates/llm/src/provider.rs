use async_trait::async_trait;

use crate::error::LlmResult;
use crate::messages::ChatMessage;
use crate::stream::TokenStream;

/// Seam between the HTTP layer and the completion endpoint.
///
/// The API key is passed per call; implementations never store one beyond
/// what their own configuration supplies to the caller.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Start a streaming completion and return its content tokens.
    ///
    /// Errors before the first token (including non-2xx statuses) are
    /// returned here; errors mid-stream arrive as stream items.
    async fn stream_chat(&self, api_key: &str, messages: Vec<ChatMessage>)
        -> LlmResult<TokenStream>;

    /// Non-streaming completion in JSON mode. Returns the raw message text.
    async fn complete_json(&self, api_key: &str, messages: Vec<ChatMessage>) -> LlmResult<String>;
}
