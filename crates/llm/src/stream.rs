//! Turn a raw SSE byte stream into a stream of content tokens.

use std::fmt::Display;
use std::pin::Pin;

use futures::stream::{BoxStream, Stream, StreamExt};

use crate::error::{LlmError, LlmResult};
use crate::messages::{parse_sse_line, SseLine};

/// Boxed stream of content tokens, as handed to the HTTP layer.
pub type TokenStream = Pin<Box<dyn Stream<Item = LlmResult<String>> + Send>>;

struct SseState<B, E> {
    inner: BoxStream<'static, Result<B, E>>,
    /// Bytes not yet terminated by a newline. Kept as bytes so multi-byte
    /// characters split across chunks are reassembled before decoding.
    buffer: Vec<u8>,
    finished: bool,
}

/// Parse an SSE body into content tokens.
///
/// Ends at `data: [DONE]` or when the byte stream ends. A transport error
/// is yielded once and terminates the stream.
pub fn token_stream<S, B, E>(bytes: S) -> impl Stream<Item = LlmResult<String>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = SseState {
        inner: bytes.boxed(),
        buffer: Vec::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }

            if let Some(newline) = state.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = state.buffer.drain(..=newline).collect();
                match parse_sse_line(&String::from_utf8_lossy(&line)) {
                    SseLine::Token(token) => return Some((Ok(token), state)),
                    SseLine::Done => return None,
                    SseLine::Skip => continue,
                }
            }

            match state.inner.next().await {
                Some(Ok(chunk)) => state.buffer.extend_from_slice(chunk.as_ref()),
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(LlmError::Stream(e.to_string())), state));
                }
                None => {
                    // Trailing line without a newline.
                    state.finished = true;
                    let rest = std::mem::take(&mut state.buffer);
                    return match parse_sse_line(&String::from_utf8_lossy(&rest)) {
                        SseLine::Token(token) => Some((Ok(token), state)),
                        SseLine::Done | SseLine::Skip => None,
                    };
                }
            }
        }
    })
}

/// Buffer a token stream into the full completion text.
pub async fn collect_tokens<S>(mut stream: S) -> LlmResult<String>
where
    S: Stream<Item = LlmResult<String>> + Unpin,
{
    let mut text = String::new();
    while let Some(token) = stream.next().await {
        text.push_str(&token?);
    }
    Ok(text)
}
