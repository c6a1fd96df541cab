//! Error handling for name-forge

use thiserror::Error;

/// Main error type for name-forge
#[derive(Error, Debug, Clone)]
pub enum NameForgeError {
    #[error("Missing required fields: {fields}")]
    MissingField { fields: String },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("{message}")]
    GenerationFailed { message: String },

    #[error("Failed to check domain availability for '{name}': {message}")]
    CheckFailed { name: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl NameForgeError {
    /// Create a missing field error
    pub fn missing_field(fields: impl Into<String>) -> Self {
        Self::MissingField {
            fields: fields.into(),
        }
    }

    /// Create a missing query parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a session lookup error
    pub fn session_not_found(id: impl std::fmt::Display) -> Self {
        Self::SessionNotFound { id: id.to_string() }
    }

    /// Create a generation failure carrying the upstream message
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    /// Create a domain check failure
    pub fn check_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the caller sent a bad request, as opposed to a server-side failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::MissingParameter { .. } | Self::InvalidRequest { .. }
        )
    }

    /// HTTP status code this error maps to at the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            _ if self.is_client_error() => 400,
            Self::SessionNotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { fields } => {
                format!("❌ Missing input: {}\n💡 Provide a description and pick a tone", fields)
            }
            Self::MissingParameter { name } => {
                format!("❌ Missing parameter: {}", name)
            }
            Self::InvalidRequest { message } => {
                format!("❌ Invalid request: {}", message)
            }
            Self::SessionNotFound { id } => {
                format!("❌ Session {} does not exist\n💡 Create a new session first", id)
            }
            Self::GenerationFailed { message } => {
                format!("❌ Name generation failed: {}\n💡 Check your API key and rate limits", message)
            }
            Self::CheckFailed { name, message } => {
                format!("⚠️  Could not check '{}': {}", name, message)
            }
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment", message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 This might be a temporary issue, try again", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<reqwest::Error> for NameForgeError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::network("Request timed out", status_code, url)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for NameForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for NameForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, NameForgeError>;

/// Helper macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::NameForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::NameForgeError::config(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NameForgeError::missing_field("description").status_code(), 400);
        assert_eq!(NameForgeError::missing_parameter("name").status_code(), 400);
        assert_eq!(NameForgeError::session_not_found("abc").status_code(), 404);
        assert_eq!(NameForgeError::generation_failed("quota").status_code(), 500);
        assert_eq!(NameForgeError::check_failed("acme", "boom").status_code(), 500);
    }

    #[test]
    fn test_generation_failed_carries_upstream_message() {
        let err = NameForgeError::generation_failed("quota exceeded");
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_parameter_display() {
        let err = NameForgeError::missing_parameter("name");
        assert_eq!(err.to_string(), "Missing required parameter: name");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_config_macro() {
        let err = config_error!("unknown provider: {}", "foo");
        assert!(err.to_string().contains("unknown provider: foo"));
    }
}
