//! Library-wide error types.

use thiserror::Error;

/// Library-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Library-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("Failed to send message via {platform}: {message}")]
    MessageSend { platform: String, message: String },

    #[error("Group '{name}' not found. Available groups: {available}")]
    GroupNotFound { name: String, available: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn send(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MessageSend {
            platform: platform.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) | Self::Config(_) => "CONFIGURATION_ERROR",
            Self::MessageSend { .. } => "MESSAGE_SEND_ERROR",
            Self::GroupNotFound { .. } => "GROUP_NOT_FOUND",
            Self::Http(_) => "HTTP_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Other(_) => "LOGIFLY_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_keeps_message() {
        let err = Error::config("Invalid config");
        assert_eq!(err.to_string(), "Invalid config");
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn message_send_error_mentions_platform_and_cause() {
        let err = Error::send("Discord", "Network timeout");
        let rendered = err.to_string();
        assert!(rendered.contains("Discord"));
        assert!(rendered.contains("Network timeout"));
        assert_eq!(err.code(), "MESSAGE_SEND_ERROR");
    }
}
