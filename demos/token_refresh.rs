use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use mirror_api::api::TimelineApi;
use mirror_api::models::TimelineItem;
use mirror_api::{ApiError, ApiResult, Client, ClientConfig, TokenSource};

/// This example demonstrates the refresh-and-retry behavior.
///
/// On a 401 response the client:
/// 1. asks the token source for a refreshed access token (exactly once)
/// 2. retries the original request with the new token (exactly once)
///
/// A second failure of any kind propagates to the caller.
struct OAuthTokens {
    access_token: Mutex<String>,
    refresh_token: String,
    token_endpoint: String,
    http: reqwest::Client,
}

#[async_trait]
impl TokenSource for OAuthTokens {
    async fn access_token(&self) -> ApiResult<String> {
        Ok(self.access_token.lock().unwrap().clone())
    }

    async fn refresh(&self) -> ApiResult<String> {
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.refresh_token),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Refresh(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Refresh(format!(
                "token endpoint answered {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Refresh(e.to_string()))?;
        let token = body["access_token"]
            .as_str()
            .ok_or_else(|| ApiError::Refresh("no access_token in response".to_string()))?
            .to_string();

        *self.access_token.lock().unwrap() = token.clone();
        Ok(token)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let tokens = Arc::new(OAuthTokens {
        // Deliberately stale: the first request will come back 401 and
        // force a refresh before the retry
        access_token: Mutex::new("expired-access-token".to_string()),
        refresh_token: std::env::var("MIRROR_REFRESH_TOKEN")
            .expect("set MIRROR_REFRESH_TOKEN to a valid refresh token"),
        token_endpoint: "https://oauth2.googleapis.com/token".to_string(),
        http: reqwest::Client::new(),
    });

    let config = ClientConfig::new("https://www.googleapis.com/mirror/v1").with_timeout(30);
    let client = Client::new(config, tokens)?;

    let item = TimelineItem::builder()
        .text("Posted through an automatic token refresh")
        .build()?;

    match client.insert_item(&item).await {
        Ok(created) => println!(
            "posted item {} (token was refreshed transparently)",
            created.id.as_deref().unwrap_or("?")
        ),
        Err(e) => println!("request failed after one refresh attempt: {e}"),
    }

    Ok(())
}
