use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::models::StockSnapshot;
use crate::services::finnhub::{FinnhubClient, FinnhubError};

/// Upstream market-data seam. The production implementation is
/// [`FinnhubClient`]; tests inject failing or canned sources.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Value, FinnhubError>;
    async fn company_profile(&self, symbol: &str) -> Result<Value, FinnhubError>;
}

#[async_trait]
impl MarketDataSource for FinnhubClient {
    async fn quote(&self, symbol: &str) -> Result<Value, FinnhubError> {
        FinnhubClient::quote(self, symbol).await
    }

    async fn company_profile(&self, symbol: &str) -> Result<Value, FinnhubError> {
        FinnhubClient::company_profile(self, symbol).await
    }
}

/// Combines a quote and a company profile for one symbol into a single
/// snapshot. All-or-nothing: if either upstream call fails, the whole
/// operation fails and no partial data leaves this module.
#[derive(Clone)]
pub struct StockAggregator {
    source: Arc<dyn MarketDataSource>,
}

impl StockAggregator {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    pub async fn get_stock_data(&self, symbol: &str) -> Result<StockSnapshot, FinnhubError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(FinnhubError::InvalidSymbol(
                "symbol must not be empty".to_string(),
            ));
        }

        // The two calls are independent, so issue them concurrently.
        // Format validation is the provider's job, not ours.
        let (quote, profile) = tokio::try_join!(
            self.source.quote(symbol),
            self.source.company_profile(symbol),
        )?;

        debug!(symbol, "Aggregated quote and profile");
        Ok(StockSnapshot { quote, profile })
    }
}
