//! Chat-completion wire types and the SSE line parser.
//!
//! Streaming responses arrive as server-sent events, one JSON chunk per
//! `data: ` line, terminated by `data: [DONE]`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// `{"type": "json_object"}` asks the endpoint for a bare JSON reply.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// One streamed chunk: `{"choices": [{"delta": {"content": "..."}}]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: Delta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Non-streaming reply: `{"choices": [{"message": {"content": "..."}}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseChoice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

// ---------------------------------------------------------------------------
// SSE lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Non-empty content delta.
    Token(String),
    /// `data: [DONE]`.
    Done,
    /// Blank lines, comments, other fields, empty deltas and malformed JSON.
    Skip,
}

pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(payload) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let payload = payload.trim();

    if payload == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
            .map_or(SseLine::Skip, SseLine::Token),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed stream chunk");
            SseLine::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_delta_yields_token() {
        let line = r#"data: {"choices":[{"delta":{"content":"snowy"}}]}"#;
        assert_eq!(parse_sse_line(line), SseLine::Token("snowy".to_string()));
    }

    #[test]
    fn done_marker_ends_stream() {
        assert_eq!(parse_sse_line("data: [DONE]"), SseLine::Done);
        assert_eq!(parse_sse_line("data: [DONE]\r\n"), SseLine::Done);
    }

    #[test]
    fn role_only_and_empty_deltas_are_skipped() {
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            SseLine::Skip
        );
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
            SseLine::Skip
        );
        assert_eq!(parse_sse_line(r#"data: {"choices":[]}"#), SseLine::Skip);
    }

    #[test]
    fn non_data_lines_and_garbage_are_skipped() {
        assert_eq!(parse_sse_line(""), SseLine::Skip);
        assert_eq!(parse_sse_line(": keep-alive"), SseLine::Skip);
        assert_eq!(parse_sse_line("event: message"), SseLine::Skip);
        assert_eq!(parse_sse_line("data: {not json"), SseLine::Skip);
    }

    #[test]
    fn request_serializes_optional_response_format() {
        let messages = [ChatMessage::system("sys"), ChatMessage::user("a fox")];
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: &messages,
            temperature: 0.7,
            stream: true,
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "a fox");
        assert_eq!(json["stream"], true);
        assert!(json.get("response_format").is_none());

        let request = ChatRequest {
            response_format: Some(ResponseFormat::json_object()),
            stream: false,
            ..request
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn response_content_is_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"{\"style\":null}"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_content().as_deref(), Some("{\"style\":null}"));

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.into_content(), None);
    }
}
