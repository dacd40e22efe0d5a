//! Chat-completion client for the DeepSeek (OpenAI-compatible) API.
//!
//! Provides the wire types, SSE token parsing, the [`ChatProvider`] seam
//! used by the HTTP layer, a `reqwest` implementation, and the style
//! classifier / suggester calls built on top of it.

pub mod classifier;
pub mod client;
pub mod error;
pub mod messages;
pub mod provider;
pub mod stream;

pub use client::DeepSeekClient;
pub use error::{LlmError, LlmResult};
pub use messages::ChatMessage;
pub use provider::ChatProvider;
pub use stream::TokenStream;
