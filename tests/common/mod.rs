use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mirror_api::{ApiError, ApiResult, Client, ClientConfig, TokenSource};

pub const STALE_TOKEN: &str = "stale-token";
pub const FRESH_TOKEN: &str = "fresh-token";

/// Token source that swaps a stale token for a fresh one on refresh and
/// counts how many times the refresh was asked for.
pub struct CountingTokens {
    token: Mutex<String>,
    refreshes: AtomicUsize,
    fail_refresh: bool,
}

impl CountingTokens {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(STALE_TOKEN.to_string()),
            refreshes: AtomicUsize::new(0),
            fail_refresh: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(STALE_TOKEN.to_string()),
            refreshes: AtomicUsize::new(0),
            fail_refresh: true,
        })
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for CountingTokens {
    async fn access_token(&self) -> ApiResult<String> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn refresh(&self) -> ApiResult<String> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh {
            return Err(ApiError::Refresh("refresh token revoked".to_string()));
        }
        *self.token.lock().unwrap() = FRESH_TOKEN.to_string();
        Ok(FRESH_TOKEN.to_string())
    }
}

pub fn client_for(base_url: &str, tokens: Arc<CountingTokens>) -> Client {
    Client::new(ClientConfig::new(base_url), tokens).unwrap()
}
