/// Errors from the completion client layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The completion endpoint returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// The token stream broke off mid-way.
    #[error("Completion stream failed: {0}")]
    Stream(String),
}

pub type LlmResult<T> = Result<T, LlmError>;
