//! Error types for the bookstore client

use bookstore_core::{SessionError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failures surfaced by the HTTP client facade and the services built on it
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The configured timeout elapsed
    #[error("Request timed out")]
    Timeout,

    /// Input rejected before dispatch
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Refreshing the session failed; the session has been cleared
    #[error("Session expired: {source}")]
    AuthExpired {
        #[source]
        source: Box<ClientError>,
    },

    /// A 2xx response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The session store failed
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// A header value could not be built
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        ClientError::Http {
            status,
            body: body.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the user has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::AuthExpired { .. }) || self.is_unauthorized()
    }

    /// Short message suitable for showing next to a failed list or form
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => "The server could not be reached".to_string(),
            ClientError::Timeout => "The server took too long to respond".to_string(),
            ClientError::Http { status: 401, .. } | ClientError::AuthExpired { .. } => {
                "Your session has expired, please log in again".to_string()
            }
            ClientError::Http { status: 403, .. } => {
                "You are not allowed to do that".to_string()
            }
            ClientError::Http { status: 404, .. } => "Not found".to_string(),
            ClientError::Http { status, .. } if *status >= 500 => {
                "The server ran into a problem".to_string()
            }
            ClientError::Http { body, .. } if !body.trim().is_empty() => body.clone(),
            ClientError::Validation(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = ClientError::http(401, "expired");
        assert!(err.is_unauthorized());
        assert!(err.requires_login());
        assert!(!ClientError::http(404, "").is_unauthorized());
        assert!(ClientError::http(404, "").is_not_found());
        assert_eq!(ClientError::Timeout.status(), None);
    }

    #[test]
    fn test_auth_expired_keeps_refresh_error() {
        let err = ClientError::AuthExpired {
            source: Box::new(ClientError::http(403, "refresh token revoked")),
        };
        assert!(err.requires_login());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("refresh token revoked"));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ClientError::http(409, "Book already exists").user_message(),
            "Book already exists"
        );
        assert_eq!(
            ClientError::http(503, "<html>").user_message(),
            "The server ran into a problem"
        );
        assert_eq!(
            ClientError::Validation(ValidationError::EmptyBasket).user_message(),
            "Basket is empty"
        );
    }
}
