use thiserror::Error;

/// Errors from loading configuration, writing logs and parsing layouts.
///
/// Search outcomes are never errors; see [`crate::SearchOutcome`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout at line {line}: {reason}")]
    Layout { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
