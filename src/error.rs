use thiserror::Error;

/// Result alias used throughout the crate
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the Mirror API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// A model invariant was broken before any network call was made
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was present but not the expected JSON shape
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// The credential collaborator failed to refresh the access token.
    /// Never retried; surfaces directly to the caller.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    /// Connection-level failure reported by the transport
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this error is an authentication failure that a token
    /// refresh might resolve
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }

    /// Whether the caller needs to re-authenticate from scratch
    pub fn requires_login(&self) -> bool {
        self.is_auth_error() || matches!(self, ApiError::Refresh(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_classification() {
        let unauthorized = ApiError::Http {
            status: 401,
            body: "Invalid Credentials".to_string(),
        };
        assert!(unauthorized.is_auth_error());
        assert!(unauthorized.requires_login());

        let server_error = ApiError::Http {
            status: 500,
            body: String::new(),
        };
        assert!(!server_error.is_auth_error());
        assert!(!server_error.requires_login());

        let refresh = ApiError::Refresh("expired refresh token".to_string());
        assert!(!refresh.is_auth_error());
        assert!(refresh.requires_login());
    }
}
