use isahc::{config::Configurable, prelude::*, HttpClient};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Per-request timeout. A hung upstream call must not hold a client
/// request open indefinitely; a timeout surfaces as an upstream failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum FinnhubError {
    Http(isahc::Error),
    Serialization(serde_json::Error),
    Api { status: u16, message: String },
    RateLimit,
    InvalidSymbol(String),
}

impl From<isahc::Error> for FinnhubError {
    fn from(error: isahc::Error) -> Self {
        FinnhubError::Http(error)
    }
}

impl From<serde_json::Error> for FinnhubError {
    fn from(error: serde_json::Error) -> Self {
        FinnhubError::Serialization(error)
    }
}

impl std::fmt::Display for FinnhubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinnhubError::Http(e) => write!(f, "HTTP error: {}", e),
            FinnhubError::Serialization(e) => write!(f, "Serialization error: {}", e),
            FinnhubError::Api { status, message } => {
                write!(f, "Upstream API error ({}): {}", status, message)
            }
            FinnhubError::RateLimit => write!(f, "Upstream rate limit exceeded"),
            FinnhubError::InvalidSymbol(s) => write!(f, "Invalid symbol: {}", s),
        }
    }
}

impl std::error::Error for FinnhubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FinnhubError::Http(e) => Some(e),
            FinnhubError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

/// Thin client for the Finnhub REST API.
///
/// The API key travels in the `X-Finnhub-Token` header rather than the
/// query string so it never shows up in request URLs or logs.
#[derive(Clone)]
pub struct FinnhubClient {
    client: HttpClient,
    base_url: String,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FinnhubError> {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, FinnhubError> {
        let client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(FinnhubClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Current trading quote for a symbol, as the raw upstream payload.
    pub async fn quote(&self, symbol: &str) -> Result<Value, FinnhubError> {
        self.get_json(&self.endpoint_url("quote", symbol)).await
    }

    /// Company profile for a symbol, as the raw upstream payload.
    pub async fn company_profile(&self, symbol: &str) -> Result<Value, FinnhubError> {
        self.get_json(&self.endpoint_url("stock/profile2", symbol))
            .await
    }

    fn endpoint_url(&self, path: &str, symbol: &str) -> String {
        format!("{}/{}?symbol={}", self.base_url, path, symbol)
    }

    async fn get_json(&self, url: &str) -> Result<Value, FinnhubError> {
        debug!(url, "Finnhub request");

        let request = isahc::Request::builder()
            .uri(url)
            .method("GET")
            .header("Accept", "application/json")
            .header("X-Finnhub-Token", &self.api_key)
            .body(())
            .map_err(|e| FinnhubError::Api {
                status: 0,
                message: format!("Request build error: {}", e),
            })?;

        let mut response = self.client.send_async(request).await?;
        let status = response.status();

        if status == 429 {
            return Err(FinnhubError::RateLimit);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body
            };
            return Err(FinnhubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await.map_err(|e| FinnhubError::Api {
            status: status.as_u16(),
            message: format!("Response body error: {}", e),
        })?;

        Ok(serde_json::from_str::<Value>(&text)?)
    }
}
