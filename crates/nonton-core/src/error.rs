use thiserror::Error;

/// Errors from unwrapping or building a response envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("envelope is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("envelope payload is not valid JSON: {0}")]
    Payload(String),

    #[error("payload could not be serialized: {0}")]
    Serialize(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
