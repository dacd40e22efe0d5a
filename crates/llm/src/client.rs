//! DeepSeek chat-completion client using [`reqwest`].

use async_trait::async_trait;

use crate::error::{LlmError, LlmResult};
use crate::messages::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use crate::provider::ChatProvider;
use crate::stream::{token_stream, TokenStream};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl Default for DeepSeekClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE)
    }
}

impl DeepSeekClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, model, temperature)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling, custom
    /// timeouts).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send(
        &self,
        api_key: &str,
        messages: &[ChatMessage],
        stream: bool,
    ) -> LlmResult<reqwest::Response> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream,
            response_format: (!stream).then(ResponseFormat::json_object),
        };

        tracing::debug!(
            model = %self.model,
            stream,
            message_count = messages.len(),
            "Sending chat completion request",
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        Self::ensure_success(response).await
    }

    // ---- private helpers ----

    /// Map non-2xx statuses to [`LlmError::Api`] carrying the body text.
    async fn ensure_success(response: reqwest::Response) -> LlmResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "Completion API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for DeepSeekClient {
    async fn stream_chat(
        &self,
        api_key: &str,
        messages: Vec<ChatMessage>,
    ) -> LlmResult<TokenStream> {
        let response = self.send(api_key, &messages, true).await?;
        Ok(Box::pin(token_stream(response.bytes_stream())))
    }

    async fn complete_json(&self, api_key: &str, messages: Vec<ChatMessage>) -> LlmResult<String> {
        let response = self.send(api_key, &messages, false).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        body.into_content()
            .ok_or_else(|| LlmError::MalformedResponse("response has no message content".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = DeepSeekClient::new("https://api.deepseek.com/", "deepseek-chat", 0.7);
        assert_eq!(
            client.completions_url(),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn default_targets_deepseek_chat() {
        let client = DeepSeekClient::default();
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(client.completions_url(), format!("{DEFAULT_BASE_URL}/chat/completions"));
    }
}
