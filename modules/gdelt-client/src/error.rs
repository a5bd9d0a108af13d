use thiserror::Error;

pub type Result<T> = std::result::Result<T, GdeltError>;

/// Failure talking to the analysis API. Callers get it back unchanged.
#[derive(Debug, Error)]
pub enum GdeltError {
    /// The request URL could not be formed, so nothing was sent.
    #[error("Invalid request: {0}")]
    Request(String),

    /// Connect, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx body that did not decode into the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GdeltError {
    fn from(err: reqwest::Error) -> Self {
        match err {
            e if e.is_decode() => GdeltError::Parse(e.to_string()),
            e if e.is_builder() => GdeltError::Request(e.to_string()),
            e => GdeltError::Network(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for GdeltError {
    fn from(err: serde_json::Error) -> Self {
        GdeltError::Parse(err.to_string())
    }
}
