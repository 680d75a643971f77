use crate::template::TemplateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure reported by the service in the `meta` block of a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Status code carried in `meta.code`
    pub code: i32,
    /// Machine-readable error identifier, never empty
    pub error_id: String,
    /// Human-readable message
    pub error_message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.code, self.error_message, self.error_id)
    }
}

impl std::error::Error for ApiError {}

/// Main error type for dispatched API operations
#[derive(Debug, Error)]
pub enum AdnError {
    /// Operation name is not in the endpoint registry
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    /// Path template could not be compiled or substituted
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Base URL from [`crate::Config`] joined with the resolved path did not parse
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Network or connection failure in the HTTP transport
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Body is not valid JSON or does not match the envelope or destination
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Service reported failure through `meta.error_id`
    #[error("API error {0}")]
    Api(ApiError),
}

/// Coarse classification of an [`AdnError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownOperation,
    Template,
    /// Invalid scheme or host in the configuration
    Url,
    Transport,
    Io,
    Decode,
    Api,
}

impl From<reqwest::Error> for AdnError {
    fn from(err: reqwest::Error) -> Self {
        AdnError::Transport(Box::new(err))
    }
}

impl From<ApiError> for AdnError {
    fn from(err: ApiError) -> Self {
        AdnError::Api(err)
    }
}

impl AdnError {
    /// Create a transport error from any error source
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        AdnError::Transport(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AdnError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            AdnError::Template(_) => ErrorKind::Template,
            AdnError::Url(_) => ErrorKind::Url,
            AdnError::Transport(_) => ErrorKind::Transport,
            AdnError::Io(_) => ErrorKind::Io,
            AdnError::Decode(_) => ErrorKind::Decode,
            AdnError::Api(_) => ErrorKind::Api,
        }
    }

    /// Get the API error if the service reported one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AdnError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Get the `meta.code` status if this is an API error
    pub fn status_code(&self) -> Option<i32> {
        self.api_error().map(|err| err.code)
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, AdnError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: i32) -> AdnError {
        AdnError::Api(ApiError {
            code,
            error_id: "abc123".to_string(),
            error_message: "nope".to_string(),
        })
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError {
            code: 400,
            error_id: "bad-param".to_string(),
            error_message: "x required".to_string(),
        };
        assert_eq!(err.to_string(), "400: x required (bad-param)");
        assert_eq!(AdnError::from(err).to_string(), "API error 400: x required (bad-param)");
    }

    #[test]
    fn test_error_permission_denied() {
        let error = api(403);
        assert!(error.is_permission_denied());
        assert!(!error.is_not_found());
        assert_eq!(error.kind(), ErrorKind::Api);
    }

    #[test]
    fn test_error_not_found() {
        let error = api(404);
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_error_kinds() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AdnError::from(decode).kind(), ErrorKind::Decode);
        assert_eq!(
            AdnError::UnknownOperation("x".to_string()).kind(),
            ErrorKind::UnknownOperation
        );
        assert_eq!(AdnError::transport("connection refused").kind(), ErrorKind::Transport);
        assert_eq!(AdnError::transport("connection refused").status_code(), None);
        let url = url::Url::parse("https://bad host/stream/0/token").unwrap_err();
        assert_eq!(AdnError::from(url).kind(), ErrorKind::Url);
    }
}
