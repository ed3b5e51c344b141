use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("could not parse timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("alert is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("alert could not be decoded: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Io(String, std::io::Error),
    #[error("failed to parse config {0}: {1}")]
    BadJson(String, serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read or write stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("webhook body is not valid JSON: {0}")]
    BadJson(serde_json::Error),
    #[error("failed to encode card: {0}")]
    Encode(serde_json::Error),
    #[error("failed to build card: {0}")]
    Card(#[from] CardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
