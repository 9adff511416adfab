use crate::error::{AppError, Result};

pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration, resolved once at process start.
///
/// The upstream API key is required: the stock endpoint cannot work
/// without it, so a missing key fails startup instead of every request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub finnhub_api_key: String,
    pub enable_password_stub: bool,
}

impl AppConfig {
    pub fn from_env(port: u16, enable_password_stub: bool) -> Result<Self> {
        let finnhub_api_key = std::env::var("FINNHUB_API_KEY")
            .map_err(|_| AppError::Config("FINNHUB_API_KEY is not set".to_string()))?;

        if finnhub_api_key.trim().is_empty() {
            return Err(AppError::Config("FINNHUB_API_KEY is empty".to_string()));
        }

        Ok(AppConfig {
            port,
            finnhub_api_key,
            enable_password_stub,
        })
    }
}
