/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed event payload. Logged and downgraded to a placeholder on the
    /// subscription path, never surfaced further.
    #[error("decode: {0}")]
    Decode(#[from] streambeat_decode::DecodeError),
    /// Channel drop or connect failure. The transport is expected to
    /// reconnect itself; this never crashes the caller.
    #[error("transport: {0}")]
    Transport(String),
    /// On-chain bulk read failure. Triggers the fallback path.
    #[error("read: {0}")]
    Read(String),
    /// Fallback source failure. Triggers the empty display state.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// Parse url error.
    #[error("parse url: {0}")]
    ParseUrl(#[from] url::ParseError),
    /// Invalid address in configuration.
    #[error("parse address: {0}")]
    ParseAddress(#[from] alloy_primitives::hex::FromHexError),
    /// Reqwest error.
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// Bounded read timeout expired.
    #[error("timeout: {0}")]
    Elapsed(#[from] tokio::time::error::Elapsed),
    /// Custom error.
    #[error("custom: {0}")]
    Custom(String),
}

impl Error {
    /// Create a custom error.
    pub fn custom(msg: impl ToString) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Create a transport error.
    pub fn transport(msg: impl ToString) -> Self {
        Self::Transport(msg.to_string())
    }

    /// Create a read error.
    pub fn read(msg: impl ToString) -> Self {
        Self::Read(msg.to_string())
    }

    /// Create an unavailable error.
    pub fn unavailable(msg: impl ToString) -> Self {
        Self::Unavailable(msg.to_string())
    }
}
