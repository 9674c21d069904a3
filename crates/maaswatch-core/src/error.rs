use thiserror::Error;

/// Which part of the streamed snapshot failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    ArrayStart,
    Element,
    ArrayEnd,
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecodeStage::ArrayStart => "array start",
            DecodeStage::Element => "machine element",
            DecodeStage::ArrayEnd => "array end",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("malformed machine snapshot at {stage}: {message}")]
    Decode { stage: DecodeStage, message: String },
}

pub type Result<T> = std::result::Result<T, WatchError>;
