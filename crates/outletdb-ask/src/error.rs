use thiserror::Error;

/// Errors returned while interpreting a question.
#[derive(Debug, Error)]
pub enum AskError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model endpoint answered with a non-2xx status.
    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("LLM returned no text")]
    EmptyResponse,

    #[error("invalid LLM base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// No API key is configured, so questions cannot be interpreted.
    #[error("question interpreter is not configured")]
    NotConfigured,
}
