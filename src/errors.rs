use thiserror::Error;

/// Failures that end a probe run with an UNKNOWN verdict.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("{0}")]
    Provider(String),
    #[error("Malformed budget record: {0}")]
    MalformedRecord(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::Provider(err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Provider(format!("invalid budget data: {err}"))
    }
}
