pub mod aggregator;
pub mod finnhub;
pub mod store;

pub use aggregator::{MarketDataSource, StockAggregator};
pub use finnhub::{FinnhubClient, FinnhubError};
pub use store::{
    CompetitionStore, InMemoryCompetitionStore, InMemoryUserStore, UserStore,
};
