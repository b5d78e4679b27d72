pub mod dashboard;
pub mod market;

pub use dashboard::DashboardService;
pub use market::{
    CachedQuoteProvider, QuoteError, QuoteProvider, StaticQuoteProvider, YahooQuoteProvider,
    GOLD_FUTURES_SYMBOL,
};
