use serde_json::Value;
use thiserror::Error;

/// Main error type for diary API operations
#[derive(Debug, Error)]
pub enum RuobrError {
    /// Credentials were rejected by the service (`error_type == "auth"`)
    #[error("authentication failed: check username and/or password")]
    Authentication,

    /// Service answered with `success: false` and a non-auth error
    #[error("service error: {message}")]
    Remote {
        message: String,
        /// Whole envelope, kept when the service gave neither `error` nor `error_type`
        payload: Option<Value>,
    },

    /// Response body was not valid JSON (error page, proxy output, etc.)
    #[error("malformed response (status {status}): {body}")]
    Protocol { status: u16, body: String },

    /// A child-scoped operation was invoked on an account with zero children
    #[error("no children on this account")]
    NoChildren,

    /// Response shape did not match the typed record being constructed
    #[error("unexpected response shape: {0}")]
    Schema(#[source] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl RuobrError {
    /// Create a `Remote` error carrying the server-provided message verbatim
    pub fn remote(message: impl Into<String>) -> Self {
        RuobrError::Remote {
            message: message.into(),
            payload: None,
        }
    }

    /// Create a `Remote` error from an envelope with no usable message
    pub fn remote_payload(payload: Value) -> Self {
        RuobrError::Remote {
            message: "request was not successful".to_string(),
            payload: Some(payload),
        }
    }

    /// Check if this error means the caller must correct credentials
    pub fn is_authentication(&self) -> bool {
        matches!(self, RuobrError::Authentication)
    }

    /// Get the HTTP status code if this is a protocol error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RuobrError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for diary API operations
pub type Result<T> = std::result::Result<T, RuobrError>;
