use thiserror::Error;

/// Errors raised while decoding, configuring or rendering a profit chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid fragment encoding: {0}")]
    InvalidEncoding(String),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Invalid render target: {0}")]
    InvalidTarget(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        ChartError::InvalidPayload(clean_serde_message(&e.to_string()))
    }
}

/// Strip the trailing position information serde_json appends to messages
///
/// "missing field `baseAsset` at line 1 column 17" becomes
/// "missing field `baseAsset`"
pub fn clean_serde_message(error_msg: &str) -> String {
    match error_msg.rfind(" at line ") {
        Some(idx) if error_msg[idx..].contains(" column ") => error_msg[..idx].trim().to_string(),
        _ => error_msg.to_string(),
    }
}
