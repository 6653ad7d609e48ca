use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::credential::TokenSource;
use crate::error::{ApiError, ApiResult};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration pointing at the given API root,
    /// e.g. `https://www.googleapis.com/mirror/v1`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query string parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Authenticated HTTP client for the Mirror API.
///
/// Holds no mutable state besides the base URL and a handle to the
/// injected [`TokenSource`]. Every request carries an
/// `Authorization: Bearer <token>` header; a 401 response triggers a
/// single token refresh followed by a single retry of the original
/// request. A second failure of any kind propagates to the caller.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl Client {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenSource>) -> ApiResult<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Validation(format!("invalid base URL: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.execute(Method::GET, path, options, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Validation(format!("failed to encode request body: {e}")))?;
        self.execute(Method::POST, path, RequestOptions::new(), Some(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::DELETE, path, RequestOptions::new(), None)
            .await
    }

    /// Issue the request, refreshing the token and retrying exactly once
    /// if the server rejects the current one
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let url = self.endpoint(path, &options.query);

        match self.send(method.clone(), &url, body.as_ref()).await {
            Err(err) if err.is_auth_error() => {
                tracing::warn!(
                    target: "mirror_api::client",
                    %url,
                    "authentication failed, refreshing access token"
                );
                self.tokens.refresh().await?;
                self.send(method, &url, body.as_ref()).await
            }
            other => other,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<T> {
        let token = self.tokens.access_token().await?;

        tracing::debug!(target: "mirror_api::client", %method, %url, "sending request");

        let mut request = self.http.request(method, url).bearer_auth(&token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        // Some endpoints (DELETE in particular) answer with an empty
        // body; decode it as JSON null so `()` targets succeed.
        if text.trim().is_empty() {
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::StaticToken;

    fn test_client(base_url: &str) -> ApiResult<Client> {
        Client::new(
            ClientConfig::new(base_url),
            Arc::new(StaticToken::new("token")),
        )
    }

    #[test]
    fn test_endpoint_building() {
        let client = test_client("https://api.example.com/mirror/v1/").unwrap();

        assert_eq!(
            client.endpoint("/timeline", &[]),
            "https://api.example.com/mirror/v1/timeline"
        );
        assert_eq!(
            client.endpoint(
                "timeline",
                &[("pageToken".to_string(), "a b".to_string())]
            ),
            "https://api.example.com/mirror/v1/timeline?pageToken=a%20b"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            test_client("not a url"),
            Err(ApiError::Validation(_))
        ));
    }
}
