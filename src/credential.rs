use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};

/// Source of OAuth2 bearer tokens for the client.
///
/// The client never stores tokens itself; it reads the current access
/// token before every request and asks this collaborator for a refresh
/// when the server rejects one. Implementations own persistence of the
/// refreshed token, so a subsequent `access_token` call must return the
/// value produced by the last successful `refresh`.
///
/// Refresh is not concurrency-safe on its own: two requests failing with
/// 401 at the same time will both ask for a refresh. Callers issuing
/// concurrent requests against the same source must serialize refreshes
/// externally (e.g. a mutex inside the implementation).
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// The current access token
    async fn access_token(&self) -> ApiResult<String>;

    /// Obtain and persist a fresh access token, returning it.
    ///
    /// Fails with [`ApiError::Refresh`] when the refresh itself is
    /// rejected; that error is never retried.
    async fn refresh(&self) -> ApiResult<String>;
}

/// A fixed token that cannot be refreshed.
///
/// Useful for short-lived scripts and tests where the caller already
/// holds a valid token and re-authentication is out of scope.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> ApiResult<String> {
        Ok(self.token.clone())
    }

    async fn refresh(&self) -> ApiResult<String> {
        Err(ApiError::Refresh(
            "static token cannot be refreshed".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token_never_refreshes() {
        let tokens = StaticToken::new("abc123");
        assert_eq!(
            tokio_test::block_on(tokens.access_token()).unwrap(),
            "abc123"
        );
        assert!(matches!(
            tokio_test::block_on(tokens.refresh()),
            Err(ApiError::Refresh(_))
        ));
    }
}
